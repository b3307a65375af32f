/// This is the prefix used in logs to identify a started service.
///
/// For example:
///
/// ```text
/// 2024-06-25T12:36:25.025312Z  INFO TRACKER: Started on: http://0.0.0.0:8080
/// 2024-06-25T12:36:25.025445Z  INFO PEER SERVER: Started on: https://0.0.0.0:4040
/// ```
pub const STARTED_ON: &str = "Started on";
