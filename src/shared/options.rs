//! Zentrale Konfiguration der Zeichenfläche.
//!
//! `CanvasOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Dateiname der Optionen-Datei.
pub const CONFIG_FILE_NAME: &str = "diagram_canvas.toml";

// ── Links ───────────────────────────────────────────────────────────

/// Krümmung neu erstellter Links.
pub const DEFAULT_LINK_FLATNESS: f32 = 20.0;

// ── Hervorhebung ────────────────────────────────────────────────────

/// Intervall des Hervorhebungs-Timers in Millisekunden.
pub const HIGHLIGHT_TICK_MS: u64 = 50;
/// Schrittweite eines Variator-Ticks (wird mit der Geschwindigkeit multipliziert).
pub const HIGHLIGHT_ALPHA_STEP: f32 = 0.1;
/// Farbe der Auswahl-Hervorhebung (RGBA: Grau).
pub const SELECTED_HIGHLIGHT_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
/// Farbe der Fokus-Hervorhebung (RGBA: Blau).
pub const FOCUSED_HIGHLIGHT_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
/// Linienstärke der Hervorhebung.
pub const HIGHLIGHT_STROKE_WIDTH: f32 = 3.0;

// ── Zoom ────────────────────────────────────────────────────────────

/// Minimaler Zoom-Faktor.
pub const ZOOM_MIN: f32 = 0.5;
/// Maximaler Zoom-Faktor.
pub const ZOOM_MAX: f32 = 2.0;
/// Zoom-Schritt pro Mausrad-Raste.
pub const ZOOM_STEP: f32 = 0.1;

// ── Marquee ─────────────────────────────────────────────────────────

/// Füllfarbe des Auswahlrechtecks (RGBA: Grau, halbtransparent).
pub const MARQUEE_FILL_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.5];
/// Rahmenfarbe des Auswahlrechtecks (RGBA: Weiß).
pub const MARQUEE_OUTLINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen der Zeichenfläche.
/// Wird als `diagram_canvas.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasOptions {
    // ── Links ───────────────────────────────────────────────────
    /// Krümmung neu erstellter Links
    pub default_link_flatness: f32,
    /// Links ohne Shift-Modifier erlauben
    #[serde(default)]
    pub allow_free_link_creation: bool,

    // ── Hervorhebung ────────────────────────────────────────────
    /// Tick-Intervall der Hervorhebungs-Animation in ms
    pub highlight_tick_ms: u64,
    /// Farbe der Auswahl-Hervorhebung
    pub selected_highlight_color: [f32; 4],
    /// Farbe der Fokus-Hervorhebung
    pub focused_highlight_color: [f32; 4],
    /// Linienstärke der Hervorhebung
    #[serde(default = "default_highlight_stroke_width")]
    pub highlight_stroke_width: f32,

    // ── Zoom ────────────────────────────────────────────────────
    /// Minimaler Zoom-Faktor
    pub zoom_min: f32,
    /// Maximaler Zoom-Faktor
    pub zoom_max: f32,
    /// Zoom-Schritt pro Mausrad-Raste
    pub zoom_step: f32,

    // ── Marquee ─────────────────────────────────────────────────
    /// Füllfarbe des Auswahlrechtecks
    pub marquee_fill_color: [f32; 4],
    /// Rahmenfarbe des Auswahlrechtecks
    pub marquee_outline_color: [f32; 4],

    // ── Neue Shapes ─────────────────────────────────────────────
    /// Radius neu erstellter Kreise
    #[serde(default = "default_circle_radius")]
    pub default_circle_radius: f32,
    /// Größe neu erstellter Rechtecke [Breite, Höhe]
    #[serde(default = "default_rect_size")]
    pub default_rect_size: [f32; 2],
    /// Größe neu erstellter Ovale [Breite, Höhe]
    #[serde(default = "default_oval_size")]
    pub default_oval_size: [f32; 2],
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            default_link_flatness: DEFAULT_LINK_FLATNESS,
            allow_free_link_creation: false,

            highlight_tick_ms: HIGHLIGHT_TICK_MS,
            selected_highlight_color: SELECTED_HIGHLIGHT_COLOR,
            focused_highlight_color: FOCUSED_HIGHLIGHT_COLOR,
            highlight_stroke_width: HIGHLIGHT_STROKE_WIDTH,

            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,

            marquee_fill_color: MARQUEE_FILL_COLOR,
            marquee_outline_color: MARQUEE_OUTLINE_COLOR,

            default_circle_radius: default_circle_radius(),
            default_rect_size: default_rect_size(),
            default_oval_size: default_oval_size(),
        }
    }
}

fn default_highlight_stroke_width() -> f32 {
    HIGHLIGHT_STROKE_WIDTH
}

fn default_circle_radius() -> f32 {
    crate::core::shape::DEFAULT_CIRCLE_RADIUS
}

fn default_rect_size() -> [f32; 2] {
    let (w, h) = crate::core::shape::DEFAULT_RECT_SIZE;
    [w, h]
}

fn default_oval_size() -> [f32; 2] {
    let (w, h) = crate::core::shape::DEFAULT_OVAL_SIZE;
    [w, h]
}

impl CanvasOptions {
    /// Lädt Canvas-Optionen aus einer TOML-Datei.
    ///
    /// Fehlende oder fehlerhafte Dateien ergeben die Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Keine Canvas-Optionen unter {}, Standardwerte", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Canvas-Optionen {} nicht lesbar: {e}", path.display());
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(opts) => {
                log::info!("Canvas-Optionen geladen: {}", path.display());
                opts
            }
            Err(e) => {
                log::warn!("Canvas-Optionen {} fehlerhaft, Standardwerte: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Schreibt die Canvas-Optionen als TOML.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content =
            toml::to_string_pretty(self).context("Canvas-Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Canvas-Optionen nach {} schreiben", path.display()))?;
        log::info!("Canvas-Optionen gespeichert: {}", path.display());
        Ok(())
    }

    /// `diagram_canvas.toml` neben der Demo-Binary, sonst im Arbeitsverzeichnis.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Hervorhebungs-Intervall als `Duration`.
    pub fn highlight_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.highlight_tick_ms)
    }

    /// Begrenzt einen Zoom-Faktor auf den erlaubten Bereich.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }
}
