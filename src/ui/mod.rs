pub mod chart;
pub mod chat_loop;
pub mod renderer;
pub mod table;
pub mod theme;
