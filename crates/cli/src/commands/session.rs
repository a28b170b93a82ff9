//! Session id generation.

use ads_analyzer_core::SessionId;

/// Print a freshly generated session id.
pub fn generate() {
    super::emit(SessionId::generate().as_str());
}
