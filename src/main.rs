use anyhow::Result;
use clap::Parser;

use smart_exam::utils::logging;
use smart_exam::{App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 解析命令行参数与配置
    let cli = Cli::parse();
    let config = Config::from_env();

    // 运行出题流程；错误向上冒泡，由 anyhow 统一呈现给用户
    App::new(config).run(cli).await?;

    Ok(())
}
