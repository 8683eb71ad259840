pub mod cancel;
pub mod constraint;
pub mod error;
pub mod format;
pub mod hash;
pub mod partition;
pub mod progress;
pub mod sample;
pub mod scan;
pub mod solver;
pub mod workers;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::SolverError;
pub use solver::MATCH_HARD_CAP;

/// Checked once per this many candidates: the cancel-poll and
/// progress-report batch boundary named in `spec.md` §4.4/§5.
pub const CANCEL_CHECK_INTERVAL: u64 = 10_000;

/// Initializes combined term+file logging, in the teacher's
/// `src/lib.rs::init()` style. No ctrl-c hook or database connection
/// here: the solver core has no async runtime and no persistence
/// layer to shut down gracefully.
#[cfg(feature = "native")]
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
