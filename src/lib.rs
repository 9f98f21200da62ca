// Library root
// -----------
// The binary (`main.rs`) parses the configuration and hands these modules
// to the interactive loop.
//
// Module responsibilities:
// - `config`: command line / environment configuration, parsed once.
// - `action`: the fixed menu table of structured docker commands.
// - `dispatch`: runs the action behind one menu selection.
// - `readiness`: waits for the stack to come up after a start.
// - `interrupt`: Ctrl+C flag checked after every blocking step.
// - `host`: every side effect on the machine (docker, browser, HTTP).
// - `api`: blocking HTTP client for the API test.
// - `ui`: menu rendering, prompts and the main loop.
// - `error`: the error type shared by all of the above.
pub mod action;
pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod interrupt;
pub mod readiness;
pub mod ui;
