//! Where non-fatal resolver warnings go.

/// Receives warnings emitted while resolving. Fire-and-forget.
pub trait WarningSink {
    fn warn(&mut self, message: &str);
}

/// Collects warnings in memory.
impl WarningSink for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
