pub mod reconstruct_tests;
