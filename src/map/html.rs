//! Leaflet HTML Export Module
//! Writes a map document as a standalone web page (Leaflet + ant-path
//! plugin) and hands it to the system browser.

use crate::map::MapDocument;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write map: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize map: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to open map: {0}")]
    Open(std::io::Error),
}

/// Page skeleton. `{{TITLE}}`, `{{WIDTH}}`, `{{HEIGHT}}` and `{{DOCUMENT}}`
/// are substituted on export.
const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>
  <!-- Coloured marker icons -->
  <link rel="stylesheet" href="https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <!-- Animated paths -->
  <script src="https://cdn.jsdelivr.net/npm/leaflet-ant-path@1.1.2/dist/leaflet-ant-path.min.js"></script>
  <style>
    html, body { margin: 0; padding: 0; }
    #map { width: {{WIDTH}}px; height: {{HEIGHT}}px; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const doc = {{DOCUMENT}};

    const map = L.map('map', {
      center: [doc.center.lat, doc.center.lon],
      zoom: doc.zoom,
    });

    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors',
    }).addTo(map);

    for (const m of doc.markers) {
      L.marker([m.location.lat, m.location.lon], {
        icon: L.AwesomeMarkers.icon({
          icon: 'info-sign',
          prefix: 'glyphicon',
          markerColor: m.color,
          iconColor: 'white',
        }),
      }).bindTooltip(m.tooltip, { sticky: true }).addTo(map);
    }

    for (const p of doc.paths) {
      L.polyline.antPath(p.locations.map((c) => [c.lat, c.lon]), {
        color: p.style.color,
        weight: p.style.weight,
        opacity: p.style.opacity,
        dashArray: p.style.dash_array,
        delay: p.style.delay,
        pulseColor: '#FFFFFF',
        hardwareAccelerated: true,
      }).addTo(map);
    }
  </script>
</body>
</html>
"#;

/// Render the page for a map document.
pub fn to_html(map: &MapDocument, title: &str) -> Result<String, ExportError> {
    // "</" inside the inline script would close the tag early.
    let document = serde_json::to_string(map)?.replace("</", "<\\/");

    Ok(MAP_TEMPLATE
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{WIDTH}}", &map.width.to_string())
        .replace("{{HEIGHT}}", &map.height.to_string())
        .replace("{{DOCUMENT}}", &document))
}

/// Write the page to `output_path`.
pub fn write_html(map: &MapDocument, title: &str, output_path: &Path) -> Result<(), ExportError> {
    let html = to_html(map, title)?;
    fs::write(output_path, html)?;
    log::info!("Map written to {}", output_path.display());
    Ok(())
}

/// Write the page to the temp directory and open it with the default app.
pub fn open_in_browser(map: &MapDocument, key: &str) -> Result<PathBuf, ExportError> {
    let path = std::env::temp_dir().join(format!("geomapping_{}.html", file_stem(key)));
    write_html(map, &page_title(key), &path)?;
    open::that(&path).map_err(ExportError::Open)?;
    Ok(path)
}

/// Title of the exported page for a query key.
pub fn page_title(key: &str) -> String {
    format!("Geomapping Visualization - {}", key)
}

/// File-name friendly version of a query key.
pub fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "map".to_string()
    } else {
        stem
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Chain, Coordinate};

    fn sample_map() -> MapDocument {
        MapDocument::render(&[Chain {
            tier1: Coordinate::new(40.0, -70.0),
            tier2: Coordinate::new(41.0, -71.0),
            tier3: None,
        }])
    }

    #[test]
    fn test_html_embeds_document() {
        let html = to_html(&sample_map(), "Acme").unwrap();

        assert!(html.contains("<title>Acme</title>"));
        assert!(html.contains("width: 1920px; height: 1080px;"));
        assert!(html.contains(r#""center":{"lat":40.5,"lon":-70.5}"#));
        assert!(html.contains(r#""zoom":5"#));
        assert!(html.contains(r#""color":"red""#));
        assert!(html.contains(r#""color":"green""#));
        assert!(html.contains(r#""tooltip":"Tier1 Point""#));
        assert!(html.contains(r#""dash_array":[10,20]"#));
        assert!(html.contains(r#""delay":400"#));
        assert!(html.contains(r#""color":"purple""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = to_html(&sample_map(), "<script>\"A&B\"").unwrap();
        assert!(html.contains("<title>&lt;script&gt;&quot;A&amp;B&quot;</title>"));
    }

    #[test]
    fn test_write_html_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.html");

        write_html(&sample_map(), "Acme", &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("L.polyline.antPath"));
    }

    #[test]
    fn test_open_failure_is_reported_as_open() {
        let err = ExportError::Open(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"));
        assert_eq!(err.to_string(), "Failed to open map: no browser");

        let err = ExportError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Acme Corp/EU"), "Acme_Corp_EU");
        assert_eq!(file_stem(""), "map");
        assert_eq!(page_title("Acme"), "Geomapping Visualization - Acme");
    }
}
