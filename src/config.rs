use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;

use crate::{
    err,
    errors::{Error, Result},
};

// 配置文件结构，对应 config.yaml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // 扫描的根目录
    pub path: String,
    // 保留天数，早于该天数的文件会被删除
    pub days: u32,
    // 扫描间隔，如 "1h"、"30m"
    pub interval: String,
    // 运行日志文件
    pub log_file: String,
}

// 解析完成的运行配置，进程生命周期内不再变化
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root: PathBuf,
    pub retention_days: u32,
    pub interval: Duration,
    pub log_file: PathBuf,
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str::<Config>(s)?)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;

        Config::from_str(&content)
    }

    // 校验字段并解析间隔字符串
    pub fn resolve(self) -> Result<RunConfig> {
        if self.path.is_empty() {
            return err!("config field 'path' must not be empty");
        }
        let interval =
            humantime::parse_duration(&self.interval).map_err(|e| Error::InvalidInterval {
                provided: self.interval.clone(),
                reason: e.to_string(),
            })?;
        if interval.is_zero() {
            return Err(Error::InvalidInterval {
                provided: self.interval.clone(),
                reason: "interval must be greater than zero".to_string(),
            });
        }

        Ok(RunConfig {
            root: PathBuf::from(self.path),
            retention_days: self.days,
            interval,
            log_file: PathBuf::from(self.log_file),
        })
    }
}

pub fn load(path: &Path) -> Result<Config> {
    Config::load(path)
}
