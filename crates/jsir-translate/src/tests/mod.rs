/*! Unit coverage for the translation context and the expression visitor.
 *
 * Context tests pin down the scoped-state guarantees: every sink swap, declaration change and
 * alias binding is undone on return, on error and while a panic unwinds. Visitor tests check
 * the produced AST directly; printed-output checks live in the integration tests.
 */

mod context_tests;
