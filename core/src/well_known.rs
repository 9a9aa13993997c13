/*!
Names of well-known properties.

Timers push the duration and long-running properties into the sink context when they finish. Sinks that attach structured properties to their records use the template property for the raw message template.
*/

/**
The elapsed time of the timed operation in milliseconds, as a floating point number.
*/
pub const KEY_OPERATION_DURATION_MS: &str = "OperationDurationMilliseconds";

/**
Present and `true` when the timed operation ran longer than its configured threshold.
*/
pub const KEY_IS_LONG_RUNNING: &str = "IsLongRunningOperation";

/**
The unrendered message template a message was written with.
*/
pub const KEY_TEMPLATE: &str = "MessageTemplate";
