mod build_test;
mod concurrency_test;
mod resolve_test;
mod scale_test;
