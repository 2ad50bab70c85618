use std::future::Future;

use chrono::Local;
use log::{error, info};
use tokio::time::{self, MissedTickBehavior};

use crate::{
    config::RunConfig,
    janitor::Janitor,
    runlog::{RunSink, TIMESTAMP_FORMAT},
};

// 调度循环：启动时立即执行一次清理，之后按固定间隔重复，
// 直到 shutdown 完成。周期内的成功或失败都不会终止循环。
pub async fn run<S: RunSink>(config: RunConfig, mut sink: S, shutdown: impl Future<Output = ()>) {
    let mut timer = time::interval(config.interval);
    // 周期固定不补偿：清理超时错过的 tick 直接跳过，
    // 同一时间最多只有一个清理周期在运行
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Scheduler shutting down");
                break;
            }
            // interval 的第一个 tick 立即完成，即启动后立刻执行首个周期
            _ = timer.tick() => run_cycle(&config, &mut sink),
        }
    }
}

// 执行一个清理周期，并把结果写入接收端
pub(crate) fn run_cycle<S: RunSink>(config: &RunConfig, sink: &mut S) {
    info!("Running check on {}", config.root.display());

    let janitor = Janitor::new(&config.root, config.retention_days);
    let outcome = janitor.purge();
    // “下次检查时间”按本周期完成时刻加间隔估算，仅用于报告；
    // 实际触发由固定周期的定时器驱动
    let next_run = Local::now()
        + chrono::Duration::from_std(config.interval).unwrap_or_else(|_| chrono::Duration::zero());

    match outcome.error {
        None => {
            let message = format!(
                "Check complete. Files deleted: {}, total size: {} bytes. Next check at {}",
                outcome.files_deleted,
                outcome.bytes_deleted,
                next_run.format(TIMESTAMP_FORMAT),
            );
            info!("{message}");
            sink.record(&message);
        }
        Some(e) => {
            let message = format!("Error: {e}");
            error!("{message}");
            sink.record(&message);
        }
    }
}
