// Public modules
pub mod briefing;
pub mod checks;
pub mod classifier;
pub mod config;
pub mod extractor;
pub mod feeds;
pub mod models;
pub mod notifier;
pub mod shuttle;
pub mod summarizer;
pub mod transit;

// Re-export commonly used types
pub use briefing::BriefingGenerator;
pub use classifier::AlertClassifier;
pub use config::{ClassifierConfig, Config, Endpoints};
pub use extractor::ContentExtractor;
pub use feeds::FlightNewsFeed;
pub use models::{AlertRecord, Briefing, Effect, RouteKey, RouteStatus, TransitStatus};
pub use notifier::{EmailNotifier, NotifyError};
pub use summarizer::{GroqSummarizer, Summary, SummaryContext};
pub use transit::TransitClient;
