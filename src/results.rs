//! Result items shown in the answer list
//!
//! A `ResultItem` is the flattened, display-ready form of one answer pod:
//! its title plus the concatenation of every plain-text fragment the pod
//! carries. Items live only for the duration of one displayed query.

use crate::engine::types::{ContentElement, Pod};

/// One row of the answer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub title: String,
    pub content: String,
}

impl ResultItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Flatten a response's pods into display items.
///
/// Pods flagged erroneous are skipped entirely. For the rest, the plain-text
/// fragments of every subpod are concatenated in the order the service
/// returned them; image, sound and other rich fragments are dropped.
pub fn items_from_pods(pods: &[Pod]) -> Vec<ResultItem> {
    pods.iter()
        .filter(|pod| !pod.is_error())
        .map(|pod| {
            let mut content = String::new();
            for subpod in &pod.subpods {
                for element in &subpod.contents {
                    if let ContentElement::PlainText(text) = element {
                        content.push_str(text);
                    }
                }
            }
            ResultItem::new(pod.title.clone(), content)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ErrorField, Subpod};

    fn pod(title: &str, error: bool, contents: Vec<Vec<ContentElement>>) -> Pod {
        Pod {
            title: title.to_string(),
            error: ErrorField::Flag(error),
            subpods: contents
                .into_iter()
                .map(|contents| Subpod { contents })
                .collect(),
        }
    }

    fn text(s: &str) -> ContentElement {
        ContentElement::PlainText(s.to_string())
    }

    #[test]
    fn test_single_pod_single_fragment() {
        let pods = vec![pod("Result", false, vec![vec![text("4")]])];
        assert_eq!(items_from_pods(&pods), vec![ResultItem::new("Result", "4")]);
    }

    #[test]
    fn test_error_pods_are_skipped() {
        let pods = vec![
            pod("Input", false, vec![vec![text("2+2")]]),
            pod("Broken", true, vec![vec![text("garbage")]]),
            pod("Result", false, vec![vec![text("4")]]),
        ];

        let items = items_from_pods(&pods);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Input");
        assert_eq!(items[1].title, "Result");
    }

    #[test]
    fn test_non_text_fragments_are_omitted() {
        let pods = vec![pod(
            "Plot",
            false,
            vec![vec![
                ContentElement::Other("img".to_string()),
                text("y = x^2"),
                ContentElement::Other("sound".to_string()),
            ]],
        )];

        let items = items_from_pods(&pods);
        assert_eq!(items[0].content, "y = x^2");
    }

    #[test]
    fn test_fragments_concatenate_across_subpods_in_order() {
        let pods = vec![pod(
            "Definition",
            false,
            vec![
                vec![text("first "), ContentElement::Other("img".to_string())],
                vec![text("second")],
            ],
        )];

        let items = items_from_pods(&pods);
        assert_eq!(items[0].content, "first second");
    }

    #[test]
    fn test_pod_order_is_preserved() {
        let pods = vec![
            pod("A", false, vec![vec![text("1")]]),
            pod("B", false, vec![vec![text("2")]]),
            pod("C", false, vec![vec![text("3")]]),
        ];

        let titles: Vec<_> = items_from_pods(&pods)
            .into_iter()
            .map(|item| item.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_response_yields_no_items() {
        assert!(items_from_pods(&[]).is_empty());
    }
}
