pub mod kinesis;
pub mod tomorrow;
