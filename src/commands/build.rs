//! Build the static site

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{BuildReport, Generator};
use crate::{og, Folio, CONFIG_FILE};

/// Build the site once
///
/// OG images are generated first when enabled; that step never fails the
/// build.
pub fn run(folio: &Folio) -> Result<BuildReport> {
    let start = Instant::now();

    if folio.config.og.enabled {
        let report = og::generate_missing(folio);
        if !report.generated.is_empty() {
            tracing::info!("Generated {} OG images", report.generated.len());
        }
    }

    let report = Generator::new(folio).generate()?;

    tracing::info!(
        "Built {} pages ({} posts, {} sitemap URLs) in {:.2}s",
        report.pages,
        report.posts,
        report.sitemap_urls,
        start.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Build again from the current `folio.yml` and date
pub fn rebuild(folio: &Folio) -> Result<BuildReport> {
    run(&folio.reload()?)
}

/// Inputs that trigger a rebuild
pub fn watch_paths(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let config = &folio.config;
    let mut paths: Vec<(PathBuf, RecursiveMode)> = [
        folio.content_dir.clone(),
        folio.templates_dir.clone(),
        folio.path(&config.css_dir),
        folio.path(&config.assets_dir),
        folio.blog_dir.clone(),
    ]
    .into_iter()
    .filter(|p| p.is_dir())
    .map(|p| (p, RecursiveMode::Recursive))
    .collect();

    let config_path = folio.base_dir.join(CONFIG_FILE);
    if config_path.is_file() {
        paths.push((config_path, RecursiveMode::NonRecursive));
    }
    paths
}

/// Editor droppings and VCS noise never trigger a rebuild
pub fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Watch the inputs and rebuild on change
pub fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watch_paths(folio) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }
                if let Err(e) = rebuild(folio) {
                    tracing::error!("Build failed: {}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("src/content/index.md")));
        assert!(!is_relevant(Path::new("repo/.git/index")));
        assert!(!is_relevant(Path::new("docs/blog/post.md~")));
        assert!(!is_relevant(Path::new("docs/blog/.post.md.swp")));
    }

    #[test]
    fn test_watch_paths_only_existing() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        assert!(watch_paths(&folio).is_empty());

        fs::create_dir_all(&folio.blog_dir).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: x\n").unwrap();
        let paths: Vec<_> = watch_paths(&folio).into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec![folio.blog_dir.clone(), dir.path().join(CONFIG_FILE)]);
    }

    #[test]
    fn test_rebuild_reads_current_config() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("src/templates")).unwrap();
        fs::write(base.join("src/templates/base.html"), "{{title}}|{{content}}").unwrap();
        fs::write(base.join("src/templates/blog-post.html"), "{{title}}").unwrap();
        fs::create_dir_all(base.join("src/content")).unwrap();
        fs::write(base.join("src/content/index.md"), "Hello").unwrap();
        let config = "og:\n  enabled: false\npages: []\ncollections: []\n";
        fs::write(base.join(CONFIG_FILE), config).unwrap();

        let folio = Folio::new(base).unwrap();
        fs::write(base.join(CONFIG_FILE), format!("{}output_dir: public\n", config)).unwrap();

        rebuild(&folio).unwrap();
        assert!(base.join("public/index.html").is_file());
        assert!(!base.join("dist").exists());
    }

    #[test]
    fn test_run_without_og() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        let mut config = SiteConfig::default();
        config.og.enabled = false;
        config.pages.clear();
        config.collections.clear();

        fs::create_dir_all(base.join("src/templates")).unwrap();
        fs::write(base.join("src/templates/base.html"), "{{title}}|{{content}}").unwrap();
        fs::write(base.join("src/templates/blog-post.html"), "{{title}}").unwrap();
        fs::create_dir_all(base.join("src/content")).unwrap();
        fs::write(base.join("src/content/index.md"), "Hello").unwrap();

        let folio = Folio::with_config(base, config);
        let report = run(&folio).unwrap();
        assert_eq!(report.posts, 0);
        assert_eq!(report.pages, 3);
        assert_eq!(report.sitemap_urls, 2);
        assert!(folio.output_dir.join("404.html").is_file());
        assert!(!folio.blog_dir.exists());
    }
}
