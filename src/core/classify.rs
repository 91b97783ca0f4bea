//! Reply classification.
//!
//! Every assistant reply is classified into exactly one presentation value
//! before anything touches the screen. Classification looks only at which
//! payload fields are present, never at the reply text, so a reply that
//! merely talks about "a table of results" without attaching one stays
//! plain text.

use crate::api::AssistantReply;
use crate::core::chart::ChartSpec;
use crate::core::dataset::TabularDataset;

/// What one reply should be presented as.
///
/// `Combined` appears only when a reply carries more than one part; a
/// single-part reply classifies directly to that part.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Text(String),
    Table(TabularDataset),
    Chart(ChartSpec),
    Combined(Vec<Presentation>),
}

impl Presentation {
    /// The flat list of parts, in presentation order.
    pub fn parts(&self) -> Vec<&Presentation> {
        match self {
            Presentation::Combined(parts) => parts.iter().collect(),
            single => vec![single],
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.parts().into_iter().find_map(|part| match part {
            Presentation::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&TabularDataset> {
        self.parts().into_iter().find_map(|part| match part {
            Presentation::Table(rows) => Some(rows),
            _ => None,
        })
    }

    pub fn chart(&self) -> Option<&ChartSpec> {
        self.parts().into_iter().find_map(|part| match part {
            Presentation::Chart(spec) => Some(spec),
            _ => None,
        })
    }
}

/// Classify one reply by payload presence.
///
/// Parts keep a fixed order: text, then table, then chart. A reply with an
/// empty dataset still yields a table part (it renders as nothing, but the
/// classification records that the backend sent structure). A chart whose
/// payload has no rows of its own plots the reply's dataset.
pub fn classify(reply: &AssistantReply) -> Presentation {
    let mut parts = Vec::new();
    if !reply.reply.is_empty() {
        parts.push(Presentation::Text(reply.reply.clone()));
    }
    if let Some(dataset) = &reply.dataset {
        parts.push(Presentation::Table(dataset.clone()));
    }
    if let Some(chart) = &reply.chart {
        parts.push(Presentation::Chart(ChartSpec::from_payload(
            chart,
            reply.dataset.as_ref(),
        )));
    }
    if parts.is_empty() {
        return Presentation::Text(String::new());
    }
    if parts.len() == 1 {
        return parts.remove(0);
    }
    Presentation::Combined(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChartPayload;
    use crate::core::chart::ChartKind;
    use serde_json::json;

    fn reply_from(raw: serde_json::Value) -> AssistantReply {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_text_only_reply_is_text() {
        let reply = reply_from(json!({"reply": "Hi there"}));
        assert_eq!(classify(&reply), Presentation::Text("Hi there".to_string()));
    }

    #[test]
    fn test_empty_reply_is_empty_text() {
        let reply = AssistantReply::default();
        assert_eq!(classify(&reply), Presentation::Text(String::new()));
    }

    #[test]
    fn test_classification_is_stable() {
        let reply = reply_from(json!({
            "reply": "Here are your accounts",
            "dataset": [{"account_name": "Acme", "revenue": 100}]
        }));
        assert_eq!(classify(&reply), classify(&reply));
    }

    #[test]
    fn test_text_mentioning_a_table_stays_text() {
        let reply = reply_from(json!({"reply": "Here is a table of results"}));
        assert!(matches!(classify(&reply), Presentation::Text(_)));
    }

    #[test]
    fn test_text_with_dataset_is_combined() {
        let reply = reply_from(json!({
            "reply": "Here are your accounts",
            "dataset": [{"account_name": "Acme", "revenue": 100}]
        }));
        let presentation = classify(&reply);
        assert_eq!(presentation.parts().len(), 2);
        assert_eq!(presentation.text(), Some("Here are your accounts"));
        assert_eq!(presentation.table().unwrap().len(), 1);
        assert!(presentation.chart().is_none());
    }

    #[test]
    fn test_dataset_without_text_is_a_bare_table() {
        let reply = reply_from(json!({"reply": "", "dataset": [{"a": 1}]}));
        assert!(matches!(classify(&reply), Presentation::Table(_)));
    }

    #[test]
    fn test_empty_dataset_still_classifies_as_table() {
        let reply = reply_from(json!({"reply": "", "dataset": []}));
        let presentation = classify(&reply);
        assert!(presentation.table().is_some());
        assert!(presentation.table().unwrap().is_empty());
    }

    #[test]
    fn test_chart_without_own_rows_plots_reply_dataset() {
        let reply = reply_from(json!({
            "reply": "Revenue trend",
            "dataset": [
                {"month": "Jan", "revenue": 10},
                {"month": "Feb", "revenue": 20}
            ],
            "chart": {"xKey": "month", "yKey": "revenue", "type": "line"}
        }));
        let presentation = classify(&reply);
        assert_eq!(presentation.parts().len(), 3);
        let chart = presentation.chart().unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.data.len(), 2);
        let series = chart.series().unwrap();
        assert_eq!(series.values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_chart_with_missing_axis_keys_still_classifies_as_chart() {
        let reply = AssistantReply {
            reply: String::new(),
            dataset: None,
            chart: Some(ChartPayload {
                data: Some(serde_json::from_value(json!([{"a": 1}])).unwrap()),
                x_key: None,
                y_key: None,
                kind: None,
            }),
        };
        let presentation = classify(&reply);
        let chart = presentation.chart().unwrap();
        assert!(chart.series().is_none());
    }
}
