// Code generation pipeline for C++ solution scaffolds
//
// signature text + statement HTML → normalized types, test cases, solution file

pub mod coerce;
pub mod cpp_types;
pub mod emitter;
pub mod examples;
pub mod manifest;
pub mod signature;
pub mod testcase;

pub use coerce::coerce_value;
pub use cpp_types::normalize_type;
pub use emitter::{emit, render_template, solution_filename, SolutionContext};
pub use examples::{extract_examples, Example};
pub use signature::{extract_cpp_signature, parse_signature, ParsedSignature};
pub use testcase::{build_cases, collect_cases, generate_test_code, render_cases, CaseSource, TestCase};
