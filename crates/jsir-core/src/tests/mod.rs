/*! Test coverage for the IR model and output AST.
 *
 * Declaration lookups drive every naming and visibility decision downstream, so the
 * containment and visibility rules are checked here directly against the table.
 */

mod js_tests;
