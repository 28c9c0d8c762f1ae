mod canonical_tests;
mod normalize_tests;
mod value_tests;
