//! SVG badge rendering.
//!
//! Each rank gets a fixed-size SVG card showing the rank, collection
//! name, floor price, 24h volume, and a trend marker tinted by the
//! sticky color. Badges are written via a temp file and rename so the
//! static file server never reads a half-written image.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rankboard_core::{BadgeRenderer, Movement, RankedCollection, TrendColor};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canvas edge length in pixels.
const BADGE_SIZE: u32 = 600;

/// Longest collection name rendered before truncation.
const MAX_NAME_CHARS: usize = 24;

const GREEN: &str = "#22c55e";
const RED: &str = "#ef4444";

/// Renders rank badges as SVG files named `{rank}.svg`.
#[derive(Debug, Clone)]
pub struct SvgBadgeRenderer {
    images_dir: PathBuf,
}

impl SvgBadgeRenderer {
    /// Creates a renderer writing into `images_dir`.
    #[must_use]
    pub fn new(images_dir: PathBuf) -> Self {
        Self { images_dir }
    }

    /// Returns the file path for a rank's badge.
    #[must_use]
    pub fn badge_path(&self, rank: u32) -> PathBuf {
        self.images_dir.join(format!("{rank}.svg"))
    }

    /// Builds the SVG document for one board entry.
    #[must_use]
    pub fn badge_svg(entry: &RankedCollection) -> String {
        let tint = match entry.color {
            TrendColor::Green => GREEN,
            TrendColor::Red => RED,
        };
        let marker = match entry.movement {
            Movement::Up => "▲",
            Movement::Down => "▼",
            Movement::Same => "◆",
        };
        let name = escape_xml(&truncate_name(&entry.collection.name));
        let floor = entry.collection.floor_price.normalize();
        let volume = entry.collection.volume_24h.normalize();
        let rank = entry.rank;

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{BADGE_SIZE}" height="{BADGE_SIZE}" viewBox="0 0 {BADGE_SIZE} {BADGE_SIZE}">
  <rect width="{BADGE_SIZE}" height="{BADGE_SIZE}" fill="#0f172a"/>
  <rect width="{BADGE_SIZE}" height="12" fill="{tint}"/>
  <text x="48" y="190" font-family="monospace" font-size="120" font-weight="bold" fill="#f8fafc">#{rank}</text>
  <text x="470" y="190" font-family="monospace" font-size="96" fill="{tint}">{marker}</text>
  <text x="48" y="280" font-family="monospace" font-size="40" fill="#e2e8f0">{name}</text>
  <text x="48" y="380" font-family="monospace" font-size="28" fill="#94a3b8">Floor {floor}</text>
  <text x="48" y="430" font-family="monospace" font-size="28" fill="#94a3b8">24h volume {volume}</text>
</svg>
"##
        )
    }
}

#[async_trait]
impl BadgeRenderer for SvgBadgeRenderer {
    async fn render(&self, entry: &RankedCollection) -> Result<()> {
        let path = self.badge_path(entry.rank);
        let svg = Self::badge_svg(entry);

        write_atomic(&path, svg.as_bytes())
            .await
            .with_context(|| format!("writing badge for rank {}", entry.rank))?;

        debug!(rank = entry.rank, path = %path.display(), "Rendered badge");
        Ok(())
    }
}

/// Replaces `path` with `contents` via a temp file and rename.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("svg.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Caps the rendered name length, appending an ellipsis when cut.
fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(MAX_NAME_CHARS - 1).collect();
    cut.push('…');
    cut
}

/// Escapes text for embedding in SVG markup.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankboard_core::Collection;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn entry(rank: u32, name: &str, movement: Movement, color: TrendColor) -> RankedCollection {
        RankedCollection {
            rank,
            collection: Collection {
                id: format!("id-{rank}"),
                name: name.to_string(),
                floor_price: dec!(1.250),
                volume_24h: dec!(340.50),
            },
            movement,
            color,
        }
    }

    #[test]
    fn test_badge_svg_contains_rank_and_name() {
        let svg = SvgBadgeRenderer::badge_svg(&entry(
            7,
            "Pixel Apes",
            Movement::Up,
            TrendColor::Green,
        ));

        assert!(svg.contains("#7<"));
        assert!(svg.contains("Pixel Apes"));
        assert!(svg.contains("Floor 1.25"));
        assert!(svg.contains("24h volume 340.5"));
    }

    #[test]
    fn test_badge_tint_follows_sticky_color() {
        let green =
            SvgBadgeRenderer::badge_svg(&entry(1, "A", Movement::Same, TrendColor::Green));
        let red = SvgBadgeRenderer::badge_svg(&entry(1, "A", Movement::Same, TrendColor::Red));

        assert!(green.contains(GREEN));
        assert!(!green.contains(RED));
        assert!(red.contains(RED));
    }

    #[test]
    fn test_badge_marker_follows_movement() {
        let up = SvgBadgeRenderer::badge_svg(&entry(1, "A", Movement::Up, TrendColor::Green));
        let down = SvgBadgeRenderer::badge_svg(&entry(1, "A", Movement::Down, TrendColor::Red));
        let same = SvgBadgeRenderer::badge_svg(&entry(1, "A", Movement::Same, TrendColor::Red));

        assert!(up.contains('▲'));
        assert!(down.contains('▼'));
        assert!(same.contains('◆'));
    }

    #[test]
    fn test_name_is_xml_escaped() {
        let svg = SvgBadgeRenderer::badge_svg(&entry(
            1,
            "<Evil & Co>",
            Movement::Up,
            TrendColor::Green,
        ));

        assert!(svg.contains("&lt;Evil &amp; Co&gt;"));
        assert!(!svg.contains("<Evil"));
    }

    #[test]
    fn test_long_name_is_truncated() {
        let long = "A".repeat(80);
        let svg = SvgBadgeRenderer::badge_svg(&entry(1, &long, Movement::Up, TrendColor::Green));

        assert!(!svg.contains(&long));
        assert!(svg.contains('…'));
    }

    #[tokio::test]
    async fn test_render_writes_rank_keyed_file() {
        let dir = TempDir::new().unwrap();
        let renderer = SvgBadgeRenderer::new(dir.path().to_path_buf());

        renderer
            .render(&entry(7, "Pixel Apes", Movement::Up, TrendColor::Green))
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("7.svg")).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains("Pixel Apes"));
    }

    #[tokio::test]
    async fn test_render_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let renderer = SvgBadgeRenderer::new(dir.path().join("images"));

        renderer
            .render(&entry(1, "A", Movement::Up, TrendColor::Green))
            .await
            .unwrap();

        assert!(dir.path().join("images").join("1.svg").exists());
    }

    #[tokio::test]
    async fn test_render_overwrites_previous_badge() {
        let dir = TempDir::new().unwrap();
        let renderer = SvgBadgeRenderer::new(dir.path().to_path_buf());

        renderer
            .render(&entry(3, "Old Name", Movement::Up, TrendColor::Green))
            .await
            .unwrap();
        renderer
            .render(&entry(3, "New Name", Movement::Down, TrendColor::Red))
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("3.svg")).unwrap();
        assert!(written.contains("New Name"));
        assert!(!written.contains("Old Name"));
    }
}
