/// Pointer hover routing to tooltip payloads.
pub mod broker;
