use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
};

use log::error;

// 运行日志与“下次检查时间”的时间格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// 每个清理周期向接收端追加一行结果
pub trait RunSink {
    fn record(&mut self, message: &str);
}

// 追加写入的运行日志文件
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LogFile { path: path.into() }
    }

    fn append(&self, message: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        writeln!(
            file,
            "{} - {}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            message
        )
    }
}

impl RunSink for LogFile {
    fn record(&mut self, message: &str) {
        // 写入失败不致命，只在诊断日志中提示
        if let Err(e) = self.append(message) {
            error!("Failed to write run log {}: {e}", self.path.display());
        }
    }
}
