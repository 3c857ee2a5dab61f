use serde::{Deserialize, Serialize};

/// A customer comment embedded in a post document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub customer_id: String,
    pub comment: String,
}
