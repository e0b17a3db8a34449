use tera_extractor::mirrors;

#[test]
fn test_all_known_domains_recognized() {
    // 任何出现在目录里的域名都必须被识别
    for domain in mirrors::all_domains() {
        let url = format!("https://{}/s/xyz12345", domain);
        assert!(mirrors::is_tera_url(&url), "域名未被识别: {}", domain);
    }
}

#[test]
fn test_is_tera_url_permissive_indicators() {
    // 结构性特征 + http 前缀就放行，宁可误判
    assert!(mirrors::is_tera_url("https://example.com/s/abcdef123"));
    assert!(mirrors::is_tera_url("https://unknown.host/share?surl=abcd1234"));

    // 没有 http 前缀、没有任何特征的输入要拒绝
    assert!(!mirrors::is_tera_url(""));
    assert!(!mirrors::is_tera_url("hello world"));
    assert!(!mirrors::is_tera_url("https://example.com/foo/bar"));
}

#[test]
fn test_extract_share_id_standard_form() {
    let id = mirrors::extract_share_id("https://www.terabox.com/s/1xyz789");
    assert_eq!(id, Some("1xyz789".to_string()));
}

#[test]
fn test_extract_share_id_link_site() {
    // 场景：短链站 teraboxlinks.site
    let url = "https://teraboxlinks.site/s/1abc123def";
    assert!(mirrors::is_tera_url(url));
    assert_eq!(
        mirrors::extract_share_id(url),
        Some("1abc123def".to_string())
    );
}

#[test]
fn test_extract_share_id_wap_surl() {
    // 场景：wap 分享页带 surl 参数
    let url = "https://1024tera.com/wap/share/link?surl=abc123";
    assert_eq!(mirrors::extract_share_id(url), Some("abc123".to_string()));
}

#[test]
fn test_extract_share_id_query_fallback() {
    let url = "https://www.terabox.com/share/init?shareid=qwe12345";
    assert_eq!(mirrors::extract_share_id(url), Some("qwe12345".to_string()));
}

#[test]
fn test_extract_share_id_mirror_domain() {
    let url = "https://mirrobox.com/s/test123";
    assert_eq!(mirrors::extract_share_id(url), Some("test123".to_string()));
}

#[test]
fn test_extract_share_id_none_for_garbage() {
    // 没有 http 协议、没有任何结构特征
    assert_eq!(mirrors::extract_share_id(""), None);
    assert_eq!(mirrors::extract_share_id("hello world"), None);
    assert_eq!(mirrors::extract_share_id("not-a-url"), None);
}

#[test]
fn test_api_domain_alias_mapping() {
    // 镜像域名映射到可用的 API 域名
    assert_eq!(mirrors::api_domain("https://mirrobox.com/s/test123"), "terabox.com");
    assert_eq!(mirrors::api_domain("https://nephobox.com/s/test123"), "terabox.com");
    assert_eq!(
        mirrors::api_domain("https://1024terabox.com/s/test123"),
        "1024tera.com"
    );
    assert_eq!(
        mirrors::api_domain("https://teraboxlinks.site/s/test123"),
        "terabox.com"
    );

    // 主域名保持自身
    assert_eq!(
        mirrors::api_domain("https://www.1024tera.com/s/test123"),
        "1024tera.com"
    );

    // 未知域名取默认值，永不失败
    assert_eq!(mirrors::api_domain("https://unknown.example.com/x"), "terabox.com");
}

#[test]
fn test_normalize_url() {
    assert_eq!(
        mirrors::normalize_url("https://mirrobox.com/s/test123"),
        "https://www.terabox.com/s/test123"
    );

    // 提取不到分享ID时原样返回
    assert_eq!(mirrors::normalize_url("hello world"), "hello world");
}

#[test]
fn test_normalize_url_idempotent() {
    let urls = [
        "https://teraboxlinks.site/s/1abc123def",
        "https://1024tera.com/wap/share/link?surl=abc123",
        "https://mirrobox.com/s/test123",
        "https://www.terabox.com/s/1xyz789",
    ];

    for url in urls {
        let once = mirrors::normalize_url(url);
        let twice = mirrors::normalize_url(&once);
        assert_eq!(once, twice, "归一化不幂等: {}", url);
    }
}

#[test]
fn test_alternative_share_urls() {
    let urls = mirrors::alternative_share_urls("1abc123def");
    assert_eq!(urls.len(), 5);
    assert_eq!(urls[0], "https://www.terabox.com/s/1abc123def");
    assert!(urls.iter().all(|u| u.ends_with("/s/1abc123def")));
}

#[test]
fn test_candidate_api_urls() {
    let candidates = mirrors::candidate_api_urls("1abc123def");
    assert_eq!(candidates.len(), 5);
    assert_eq!(candidates[0].domain, "terabox.com");
    assert!(candidates[0].shorturlinfo.contains("shorturl=1abc123def"));
    assert!(candidates[0].page.ends_with("/s/1abc123def"));
}

#[test]
fn test_api_endpoints() {
    let endpoints = mirrors::api_endpoints("https://www.terabox.com/s/abc123");
    assert_eq!(endpoints.base, "https://www.terabox.com");
    assert_eq!(endpoints.api, "https://www.terabox.com/api");
    assert_eq!(endpoints.share, "https://www.terabox.com/share");
}
