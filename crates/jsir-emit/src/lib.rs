/*! Turn the JavaScript output AST into text.
 *
 * The translator only builds trees. Reading generated code is how you debug a lowering rule, so
 * this crate prints fragments either as indented source or as a single line that fits in a test
 * assertion.
 */

pub mod config;
pub mod emitter;
pub mod js_printer;

pub use config::{EmitterConfig, IndentStyle, OutputStyle};
pub use emitter::{EmitContext, EmitResult, Emitter};
pub use js_printer::JsPrinter;
