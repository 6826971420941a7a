//! `robots.txt` generation.

use flexdocs_config::ResolvedEnvironment;

use crate::sitemap::sitemap_url;

/// Render `robots.txt` for an environment.
///
/// Indexable environments allow everything and advertise the sitemap and
/// host. Deploy previews and branch deploys disallow everything and
/// advertise neither.
pub fn robots_txt(environment: &ResolvedEnvironment, sitemap_enabled: bool) -> String {
    if !environment.name.allows_indexing() {
        return "User-agent: *\nDisallow: /\n".to_owned();
    }

    let mut robots = String::from("User-agent: *\nDisallow:\n");
    if sitemap_enabled {
        robots.push_str(&format!("Sitemap: {}\n", sitemap_url(environment)));
    }
    robots.push_str(&format!(
        "Host: {}\n",
        environment.site_url.trim_end_matches('/')
    ));
    robots
}
