use clap::Parser;

/// Terabox 分享链接解析器
#[derive(Parser, Debug)]
#[command(name = "teradl")]
#[command(version = "1.0")]
#[command(author = "rpeng252@gmail.com")]
#[command(about = "一个多策略的 Terabox 分享链接直链解析工具", long_about = None)]
pub struct Cli {
    /// 分享链接 (支持 terabox.com 及所有已知镜像域名)
    #[arg(long, value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: String,

    /// 代理地址 (可选)
    #[arg(long, value_name = "PROXY")]
    pub proxy: Option<String>,

    /// 整体提取超时 (秒)
    #[arg(long, value_name = "SECONDS", default_value_t = 120)]
    pub timeout: u64,

    /// 单个策略的最大重试次数
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    pub retries: u32,

    /// 禁用浏览器回退策略
    #[arg(long, default_value_t = false)]
    pub no_browser: bool,

    /// 以 JSON 输出完整提取结果
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
