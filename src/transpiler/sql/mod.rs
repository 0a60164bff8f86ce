pub mod offset_fetch;
pub mod top_skip;
