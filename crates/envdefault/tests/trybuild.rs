//! Compile-time tests for the `EnvDefault` derive macro.
//!
//! Run with: cargo nextest run --package envdefault trybuild

#[test]
fn compile_pass() {
    let t = trybuild::TestCases::new();
    t.pass("tests/compile_pass/basic.rs");
    t.pass("tests/compile_pass/all_attributes.rs");
    t.pass("tests/compile_pass/generic.rs");
}
