pub mod cleanup;

use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    // 前台执行一次清理后退出
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub cleanup: bool,
    // 配置文件路径，默认读取 SWEEPERD_CONFIG_FILE 或 config.yaml
    #[arg(long)]
    pub config: Option<String>,
}
