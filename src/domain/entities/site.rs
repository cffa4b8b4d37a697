//! Tenant site record.

/// One tenant within the network (`{prefix}blogs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub blog_id: i64,
    pub site_id: i64,
    pub domain: String,
    pub path: String,
}

impl SiteRecord {
    pub fn new(blog_id: i64, site_id: i64, domain: String, path: String) -> Self {
        Self {
            blog_id,
            site_id,
            domain,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_record_creation() {
        let site = SiteRecord::new(2, 1, "shop.example.com".to_string(), "/".to_string());

        assert_eq!(site.blog_id, 2);
        assert_eq!(site.site_id, 1);
        assert_eq!(site.domain, "shop.example.com");
    }
}
