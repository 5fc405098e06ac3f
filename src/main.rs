use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use vokindle::config::{Cli, VokindleConfig};
use vokindle::exporter::Exporter;
use vokindle::pipeline::{run_exports, ExportOptions};
use vokindle::stats::print_summary;
use vokindle::translator::HttpTranslator;
use vokindle::utils::{collect_input_files, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    let total_start = Instant::now();

    match run(&cli).await {
        Ok(()) => {
            if !cli.quiet {
                info!("✅ 处理完成！总耗时: {:.3}秒", total_start.elapsed().as_secs_f64());
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = VokindleConfig::from_cli(cli);
    config.validate().context("配置无效")?;

    let pattern = config.build_location_pattern()?;
    let files = collect_input_files(&cli.inputs)?;
    let exporter = Exporter::new(config.output_dir());
    let options = ExportOptions::from_cli(cli);

    // 只有需要翻译时才创建HTTP客户端
    let translator = if cli.translate && options.vocabulary {
        Some(HttpTranslator::new(&config)?)
    } else {
        None
    };

    if !cli.quiet {
        info!("🚀 启动Kindle划线提取");
        info!("📂 输入文件: {} 个", files.len());
        info!("📄 输出目录: {}", config.output_dir().display());
        if translator.is_some() {
            info!("🌐 目标语言: {}", config.target_lang());
        }
    }

    let processed = run_exports(&files, &pattern, &options, translator.as_ref(), &exporter)
        .await
        .context("导出失败")?;

    // 合并模式总是打印摘要
    if cli.merge || cli.stats {
        for (export, report) in &processed {
            print_summary(&report.name, export.stats()?);
        }
    }

    Ok(())
}
