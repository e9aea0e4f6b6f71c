//! # LogWriter - simple delivery printer
//!
//! A minimal listener that prints every delivery to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [delivered] listener="LogWriter" args=[5,"b"]
//! [delivered] listener="LogWriter" args=["a"]
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ListenerError;
use crate::listeners::Listen;

/// Delivery printer listener.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listen for LogWriter {
    async fn on_event(&self, args: Vec<Value>) -> Result<(), ListenerError> {
        println!(
            "[delivered] listener={:?} args={}",
            self.name(),
            Value::Array(args)
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn delivery_never_fails() {
        let w = LogWriter::new();
        assert!(w.on_event(vec![json!(5), json!("b")]).await.is_ok());
        assert_eq!(w.name(), "LogWriter");
    }
}
