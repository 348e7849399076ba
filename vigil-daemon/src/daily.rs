use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};

use vigil_knowledge::KnowledgeSummary;

use crate::scheduler::{JobKind, SchedulerState};
use crate::state::AppState;

/// The once-a-day job: report on the knowledge base and assemble the
/// daily prompt.
pub async fn run_daily_task(state: &AppState) -> KnowledgeSummary {
    let summary = state.knowledge().lock().await.get_summary();
    info!(
        "[{}] Daily task running: {} knowledge entries, {} categories, {} tags, avg importance {:.1}",
        state.config.bot_name(),
        summary.total_entries,
        summary.categories.len(),
        summary.tags.len(),
        summary.avg_importance
    );
    match state.build_daily_prompt() {
        Ok(prompt) => debug!("Daily prompt ready ({} chars)", prompt.chars().count()),
        Err(err) => warn!("Daily prompt unavailable: {}", err),
    }
    summary
}

pub fn start_daily_runner(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    let schedule = state.config.daily_schedule();
    let check_seconds = state.config.settings.scheduler.check_seconds.max(1);
    let mut interval = interval_at(
        Instant::now() + Duration::from_secs(check_seconds),
        Duration::from_secs(check_seconds),
    );
    let mut scheduler = SchedulerState::new();
    scheduler.poll(JobKind::DailyTask, &schedule, Local::now().naive_local());

    let bot = state.config.bot_name().to_string();
    let handle = tokio::spawn(async move {
        loop {
            interval.tick().await;
            if scheduler.poll(JobKind::DailyTask, &schedule, Local::now().naive_local()) {
                run_daily_task(&state).await;
            }
        }
    });

    info!(
        "[{}] Daily task scheduled for {} (checking every {}s)",
        bot, schedule, check_seconds
    );
    handle
}
