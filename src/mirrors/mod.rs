use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

// Terabox 的主域名（官方在这些根域名上提供 API）
pub const PRIMARY_DOMAINS: &[&str] = &[
    "terabox.com",
    "teraboxapp.com",
    "1024tera.com",
    "terabox.app",
    "terabox.tech",
    "terabox.fun",
];

// 官方镜像
pub const OFFICIAL_MIRRORS: &[&str] = &["gcloud.live", "dubox.com", "pan.baidu.com"];

// 短链接 / 分享站
pub const LINK_SITES: &[&str] = &[
    "teraboxlink.com",
    "teraboxlinks.site",
    "terasharelink.com",
    "teralink.me",
    "teraboxshare.com",
    "terafileshare.com",
    "teraboxdownload.com",
    "teradl.com",
    "tera-link.com",
    "terabox.link",
    "teraboxurl.com",
];

// 镜像站（仅换壳，API 仍在主域名上）
pub const MIRROR_DOMAINS: &[&str] = &[
    "mirrobox.com",
    "nephobox.com",
    "4funbox.com",
    "1024terabox.com",
    "freeterabox.com",
    "momerybox.com",
    "tibibox.com",
    "xhobox.com",
    "happybox.org",
    "boxtera.net",
    "teracloud.me",
    "cloudtera.net",
];

// 地区性 / 替代域名
pub const ALTERNATIVE_DOMAINS: &[&str] = &[
    "terabox.co",
    "terabox.net",
    "terabox.org",
    "terabox.io",
    "terabox.cloud",
    "terabox.me",
    "teraboxcdn.com",
    "terabox-cdn.com",
    "tera-box.com",
    "tera.box",
];

// 下载 / API 子域名
pub const API_DOMAINS: &[&str] = &[
    "d.terabox.com",
    "dl.teraboxapp.com",
    "data.teraboxapp.com",
    "www.terabox.com",
    "www.teraboxapp.com",
    "www.1024tera.com",
    "api.terabox.com",
    "m.terabox.com",
    "pan.terabox.com",
    "c.terabox.com",
    "d2.terabox.com",
    "d3.terabox.com",
];

// 第三方解析站
pub const THIRD_PARTY_EXTRACTORS: &[&str] = &[
    "teradownloader.com",
    "terabox.hnn.workers.dev",
    "teraboxvideodownloader.com",
    "savetera.com",
    "terasave.com",
    "tera.instavideosave.com",
    "teraboxplayer.com",
    "terabox-dl.com",
];

// 镜像域名 → API 域名的映射表
const DOMAIN_ALIASES: &[(&str, &str)] = &[
    ("mirrobox.com", "terabox.com"),
    ("nephobox.com", "terabox.com"),
    ("4funbox.com", "terabox.com"),
    ("freeterabox.com", "terabox.com"),
    ("momerybox.com", "terabox.com"),
    ("tibibox.com", "terabox.com"),
    ("xhobox.com", "terabox.com"),
    ("1024terabox.com", "1024tera.com"),
    ("teraboxlinks.site", "terabox.com"),
    ("teraboxlink.com", "terabox.com"),
    ("terasharelink.com", "terabox.com"),
    ("teraboxshare.com", "terabox.com"),
    ("terafileshare.com", "terabox.com"),
];

lazy_static! {
    // 子域名形态
    static ref SUBDOMAIN_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"[\w-]+\.terabox\.com").unwrap(),
        Regex::new(r"[\w-]+\.teraboxapp\.com").unwrap(),
        Regex::new(r"[\w-]+\.1024tera\.com").unwrap(),
        Regex::new(r"[\w-]+\.dubox\.com").unwrap(),
        Regex::new(r"[\w-]+\.gcloud\.live").unwrap(),
        Regex::new(r"[\w-]+\.teraboxlinks\.site").unwrap(),
    ];

    // 分享链接的结构形态，按优先级排列；约定分享ID始终是最后一个捕获组
    static ref URL_PATTERNS: Vec<Regex> = vec![
        // 标准分享链接: /s/xxxxx
        Regex::new(
            r"(?i)https?://(?:www\.)?(?:[\w-]+\.)?(terabox|teraboxapp|1024tera|dubox|mirrobox|nephobox|4funbox|freeterabox|teraboxshare|momerybox|tibibox|xhobox|gcloud|teraboxlink|teraboxlinks|terasharelink|terafileshare|1024terabox|happybox|boxtera|teracloud|cloudtera)\.(?:com|app|live|tech|fun|site|me|net|org|link)/s/([a-zA-Z0-9_-]+)"
        ).unwrap(),
        // 无 /s/ 前缀的短链接
        Regex::new(
            r"(?i)https?://(?:www\.)?(?:[\w-]+\.)?(?:terabox|teraboxapp|1024tera)\.(?:com|app)/([a-zA-Z0-9_-]{8,})"
        ).unwrap(),
        // web/wap 分享页: ?surl=
        Regex::new(
            r"(?i)https?://(?:www\.)?(?:[\w-]+\.)?(?:terabox|teraboxapp|1024tera|dubox)\.(?:com|app)/(?:web|wap)/share/(?:init|link|filelist)\?surl=([a-zA-Z0-9_-]+)"
        ).unwrap(),
        // 直接文件链接
        Regex::new(
            r"(?i)https?://(?:[\w-]+\.)?(?:terabox|teraboxapp|1024tera)\.(?:com|app)/file/([a-zA-Z0-9_-]+)"
        ).unwrap(),
        // 任意位置的 shareid 参数
        Regex::new(r"(?i)https?://[^\s]+[?&]shareid=([a-zA-Z0-9_-]+)").unwrap(),
        // 任意位置的 surl 参数
        Regex::new(r"(?i)https?://[^\s]+[?&]surl=([a-zA-Z0-9_-]+)").unwrap(),
        // teraboxlinks.site 专用形态
        Regex::new(r"(?i)https?://(?:www\.)?teraboxlinks\.site/(?:s/)?([a-zA-Z0-9_-]+)").unwrap(),
    ];

    static ref ID_SEGMENT: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
    static ref HTTP_PREFIX: Regex = Regex::new(r"https?://[^\s]+").unwrap();
}

/// 所有已知域名的合集
pub fn all_domains() -> Vec<&'static str> {
    let mut domains = Vec::new();
    domains.extend_from_slice(PRIMARY_DOMAINS);
    domains.extend_from_slice(OFFICIAL_MIRRORS);
    domains.extend_from_slice(LINK_SITES);
    domains.extend_from_slice(MIRROR_DOMAINS);
    domains.extend_from_slice(ALTERNATIVE_DOMAINS);
    domains.extend_from_slice(API_DOMAINS);
    domains.extend_from_slice(THIRD_PARTY_EXTRACTORS);
    domains
}

/// 判断输入是否为 Terabox 链接。
/// 故意放宽：宁可误判也不漏判，后续提取阶段会对非法链接干净地失败。
pub fn is_tera_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let url_lower = url.to_lowercase();

    for domain in all_domains() {
        if url_lower.contains(domain) {
            return true;
        }
    }

    for pattern in SUBDOMAIN_PATTERNS.iter() {
        if pattern.is_match(&url_lower) {
            return true;
        }
    }

    // 常见的结构性特征
    let indicators = ["/s/", "surl=", "shareid=", "terabox", "tera", "dubox"];
    if indicators.iter().any(|ind| url_lower.contains(ind)) && HTTP_PREFIX.is_match(url) {
        return true;
    }

    false
}

/// 从任意形态的 Terabox 链接中提取分享ID
pub fn extract_share_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    // 逐个尝试结构形态，取最后一个捕获组
    for pattern in URL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            let share_id = caps.iter().skip(1).flatten().last().map(|m| m.as_str());
            if let Some(id) = share_id {
                if id.len() >= 4 {
                    return Some(id.to_string());
                }
            }
        }
    }

    // 兜底：解析查询参数和路径
    let parsed = Url::parse(url).ok()?;

    let param_names = ["surl", "shareid", "share_id", "id", "fid", "s"];
    for name in param_names {
        if let Some((_, value)) = parsed.query_pairs().find(|(k, _)| k == name) {
            if !value.is_empty() {
                return Some(value.into_owned());
            }
        }
    }

    let segments: Vec<&str> = parsed
        .path()
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    // /s/xxxxx 形态
    if let Some(pos) = segments.iter().position(|s| *s == "s") {
        if let Some(next) = segments.get(pos + 1) {
            return Some((*next).to_string());
        }
    }

    // 从后往前找第一个像分享ID的路径段
    for part in segments.iter().rev() {
        if part.len() >= 6 && ID_SEGMENT.is_match(part) {
            return Some((*part).to_string());
        }
    }

    None
}

/// 把链接映射到可用的 API 域名，永不失败
pub fn api_domain(url: &str) -> &'static str {
    let url_lower = url.to_lowercase();

    for &(alias, mapped) in DOMAIN_ALIASES {
        if url_lower.contains(alias) {
            return mapped;
        }
    }

    for &domain in PRIMARY_DOMAINS {
        if url_lower.contains(domain) {
            return domain;
        }
    }

    "terabox.com"
}

/// 归一化为标准 https 分享链接；提取不到分享ID时原样返回
pub fn normalize_url(url: &str) -> String {
    match extract_share_id(url) {
        Some(share_id) => format!("https://www.{}/s/{}", api_domain(url), share_id),
        None => url.to_string(),
    }
}

/// 某个域名的 API 端点集合
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEndpoints {
    pub base: String,
    pub api: String,
    pub share: String,
}

/// 根据链接取对应域名的端点；未知域名按惯例拼出默认端点
pub fn api_endpoints(url: &str) -> ApiEndpoints {
    let domain = api_domain(url);

    if domain == "teraboxlinks.site" {
        return ApiEndpoints {
            base: "https://teraboxlinks.site".to_string(),
            api: "https://teraboxlinks.site/api".to_string(),
            share: "https://teraboxlinks.site".to_string(),
        };
    }

    ApiEndpoints {
        base: format!("https://www.{}", domain),
        api: format!("https://www.{}/api", domain),
        share: format!("https://www.{}/share", domain),
    }
}

/// 同一个分享ID在不同域名下的备选分享页
pub fn alternative_share_urls(share_id: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for domain in PRIMARY_DOMAINS.iter().take(3) {
        urls.push(format!("https://www.{}/s/{}", domain, share_id));
    }
    for domain in OFFICIAL_MIRRORS.iter().take(2) {
        urls.push(format!("https://www.{}/s/{}", domain, share_id));
    }

    urls
}

/// 直接域名解析策略要轮询的候选 API
#[derive(Debug, Clone)]
pub struct CandidateApi {
    pub domain: &'static str,
    pub shorturlinfo: String,
    pub list: String,
    pub page: String,
}

pub fn candidate_api_urls(share_id: &str) -> Vec<CandidateApi> {
    const DOMAINS_TO_TRY: &[&str] = &[
        "terabox.com",
        "teraboxapp.com",
        "1024tera.com",
        "dubox.com",
        "gcloud.live",
    ];

    DOMAINS_TO_TRY
        .iter()
        .map(|&domain| CandidateApi {
            domain,
            shorturlinfo: format!(
                "https://www.{}/api/shorturlinfo?shorturl={}&root=1",
                domain, share_id
            ),
            list: format!("https://www.{}/share/list?shorturl={}&root=1", domain, share_id),
            page: format!("https://www.{}/s/{}", domain, share_id),
        })
        .collect()
}
