use prometheus::{register_counter_vec, register_int_counter};
use prometheus::{CounterVec, IntCounter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUESTIONS_CREATED: IntCounter =
        register_int_counter!("trivia_questions_created_total", "Number of created questions")
            .unwrap();
    pub static ref QUESTIONS_DELETED: IntCounter =
        register_int_counter!("trivia_questions_deleted_total", "Number of deleted questions")
            .unwrap();
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Number of questions handed out by the quiz",
        &["category"]
    )
    .unwrap();
}

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Register the counters up front so `/metrics` lists them before first use.
pub fn register_metrics() {
    lazy_static::initialize(&QUESTIONS_CREATED);
    lazy_static::initialize(&QUESTIONS_DELETED);
    lazy_static::initialize(&QUIZ_QUESTIONS_SERVED);
}
