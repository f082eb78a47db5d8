pub mod dump;
pub mod run;

#[cfg(test)]
mod run_tests;
