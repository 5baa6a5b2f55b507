//! Classification collaborator boundary
//!
//! The external service that labels findings on a corrected radiograph is
//! out of scope; this module pins down the contract the pipeline relies
//! on - one image in, zero or more labeled findings out - and the one piece
//! of recovery policy that belongs to the capture pipeline: if the service
//! rejects the corrected crop, retry exactly once with the uncropped
//! original frame, then surface the failure unchanged. Isolation is an
//! optimization, not a prerequisite for producing some result.

use crate::error::{ClassificationError, SessionResult};
use crate::outbound::to_data_uri;
use panorex_core::Frame;
use serde::{Deserialize, Serialize};

/// Request payload for the classification collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Base64 data URI of the outbound image (`data:image/png;base64,...`)
    pub image: String,
    /// Finding categories the caller wants evaluated
    pub categories: Vec<String>,
    /// Request an annotated copy of the image in the response
    pub annotate: bool,
}

/// One labeled finding returned by the collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Finding category name
    pub name: String,
    /// Number of occurrences
    pub count: u32,
    /// Identifiers of the affected regions (e.g. tooth numbers)
    pub regions: Vec<String>,
}

/// Response payload from the classification collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// Annotated copy of the submitted image, if requested
    pub annotated_image: Option<String>,
    /// Labeled findings; may be empty
    pub findings: Vec<Finding>,
}

/// The external classification collaborator
///
/// Implementations own transport, authentication, and the exact wire
/// schema. The pipeline only assumes the request/response shapes above.
pub trait Classifier {
    /// Classify one outbound image.
    fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResponse, ClassificationError>;
}

/// Classify the corrected crop, falling back once to the uncropped frame.
///
/// Sends `corrected` first. If the collaborator rejects it
/// ([`ClassificationError::Rejected`]), retries exactly once with
/// `original`; any second failure - and any transport failure on the first
/// attempt - is returned unchanged. Both attempts use the same encoding
/// path as every other outbound image.
pub fn classify_with_fallback<C: Classifier>(
    classifier: &C,
    corrected: &Frame,
    original: &Frame,
    categories: &[String],
) -> SessionResult<ClassificationResponse> {
    let request = ClassificationRequest {
        image: to_data_uri(corrected)?,
        categories: categories.to_vec(),
        annotate: true,
    };

    match classifier.classify(&request) {
        Ok(response) => Ok(response),
        Err(ClassificationError::Rejected(reason)) => {
            tracing::warn!(%reason, "corrected crop rejected, retrying with uncropped frame");
            let retry = ClassificationRequest {
                image: to_data_uri(original)?,
                categories: categories.to_vec(),
                annotate: true,
            };
            classifier.classify(&retry).map_err(Into::into)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use panorex_core::FrameMut;
    use std::cell::RefCell;

    struct ScriptedClassifier {
        // one scripted outcome per expected call
        outcomes: RefCell<Vec<Result<ClassificationResponse, ClassificationError>>>,
        calls: RefCell<usize>,
    }

    impl ScriptedClassifier {
        fn new(outcomes: Vec<Result<ClassificationResponse, ClassificationError>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl Classifier for ScriptedClassifier {
        fn classify(
            &self,
            _request: &ClassificationRequest,
        ) -> Result<ClassificationResponse, ClassificationError> {
            *self.calls.borrow_mut() += 1;
            self.outcomes.borrow_mut().remove(0)
        }
    }

    fn ok_response() -> ClassificationResponse {
        ClassificationResponse {
            annotated_image: None,
            findings: vec![Finding {
                name: "caries".into(),
                count: 2,
                regions: vec!["16".into(), "37".into()],
            }],
        }
    }

    fn frame() -> Frame {
        FrameMut::new(4, 4, 3).unwrap().into()
    }

    #[test]
    fn test_success_needs_no_fallback() {
        let classifier = ScriptedClassifier::new(vec![Ok(ok_response())]);
        let res =
            classify_with_fallback(&classifier, &frame(), &frame(), &["caries".into()]).unwrap();
        assert_eq!(res.findings.len(), 1);
        assert_eq!(classifier.calls(), 1);
    }

    #[test]
    fn test_rejection_retries_once_with_original() {
        let classifier = ScriptedClassifier::new(vec![
            Err(ClassificationError::Rejected("no structure".into())),
            Ok(ok_response()),
        ]);
        let res =
            classify_with_fallback(&classifier, &frame(), &frame(), &["caries".into()]).unwrap();
        assert_eq!(res.findings[0].count, 2);
        assert_eq!(classifier.calls(), 2);
    }

    #[test]
    fn test_second_rejection_surfaces_unchanged() {
        let classifier = ScriptedClassifier::new(vec![
            Err(ClassificationError::Rejected("no structure".into())),
            Err(ClassificationError::Rejected("still nothing".into())),
        ]);
        let err = classify_with_fallback(&classifier, &frame(), &frame(), &[]).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Classification(ClassificationError::Rejected(r)) if r == "still nothing"
        ));
        assert_eq!(classifier.calls(), 2);
    }

    #[test]
    fn test_transport_failure_does_not_retry() {
        let classifier = ScriptedClassifier::new(vec![Err(ClassificationError::Transport(
            "timeout".into(),
        ))]);
        let err = classify_with_fallback(&classifier, &frame(), &frame(), &[]).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Classification(ClassificationError::Transport(_))
        ));
        assert_eq!(classifier.calls(), 1);
    }

    #[test]
    fn test_request_payload_shape() {
        let req = ClassificationRequest {
            image: "data:image/png;base64,AAAA".into(),
            categories: vec!["caries".into()],
            annotate: true,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"image\""));
        assert!(json.contains("\"categories\""));
        assert!(json.contains("\"annotate\":true"));
    }
}
