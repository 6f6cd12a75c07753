//! Modal overlay content
//!
//! A fixed set of messages, each with static markup for the overlay body.

/// Which message the overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Smile,
    Gallery,
    Note,
    Wish,
    Video,
}

impl ModalKind {
    pub const ALL: [ModalKind; 5] = [
        ModalKind::Smile,
        ModalKind::Gallery,
        ModalKind::Note,
        ModalKind::Wish,
        ModalKind::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::Smile => "smile",
            ModalKind::Gallery => "gallery",
            ModalKind::Note => "note",
            ModalKind::Wish => "wish",
            ModalKind::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "smile" => Some(ModalKind::Smile),
            "gallery" => Some(ModalKind::Gallery),
            "note" => Some(ModalKind::Note),
            "wish" => Some(ModalKind::Wish),
            "video" => Some(ModalKind::Video),
            _ => None,
        }
    }

    /// Whether the body contains a `<video>` that needs wiring
    pub fn has_video(&self) -> bool {
        matches!(self, ModalKind::Video)
    }

    /// Overlay body markup
    pub fn body_html(&self) -> &'static str {
        match self {
            ModalKind::Smile => SMILE_HTML,
            ModalKind::Gallery => GALLERY_HTML,
            ModalKind::Note => NOTE_HTML,
            ModalKind::Wish => WISH_HTML,
            ModalKind::Video => VIDEO_HTML,
        }
    }
}

const SMILE_HTML: &str = r#"
<p>
  If you smiled even a lil,<br>
  that’s more than enough for me 🙂‍↔️<br><br>
  Mission accomplished.
</p>"#;

const GALLERY_HTML: &str = r#"
<div class="memory-wrapper">
  <div class="gallery">
    <img src="images/photo2.jpeg">
    <img src="images/photo5.jpeg">
    <img src="images/photo3.jpeg">
    <img src="images/photo4.jpeg">
  </div>
  <div class="swipe-hint">← swipe →</div>
  <div class="memory-caption">
    Just some moments I like looking back on 🤍
  </div>
</div>"#;

const NOTE_HTML: &str = r#"
<p>
  I don’t usually do things like this,<br><br>
  but some people quietly become important,
  and i had to say this to you.<br><br>
  I love the way you exist, how you're so kind,
  thoughtful and unfairly soo damn cute 😭<br><br>
  I just wanted you to know you matter to me.<br><br>
  And I hope you receive soo much love and kindness this year,
  the kind you've always given so freely.<br><br>
  Happy New Year 🤍🫂
</p>"#;

const WISH_HTML: &str = r#"
<p>
  That this year is gentle with you,<br>
  and reminds you how special you are💃
</p>"#;

const VIDEO_HTML: &str = r#"
<div class="video-wrapper">
  <video controls playsinline>
    <source src="video/memory.mp4" type="video/mp4">
  </video>
  <p class="video-caption">
    This one makes me smile every time 😭
  </p>
</div>"#;

/// Overlay visibility state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    kind: Option<ModalKind>,
}

impl Overlay {
    pub fn is_visible(&self) -> bool {
        self.kind.is_some()
    }

    pub fn kind(&self) -> Option<ModalKind> {
        self.kind
    }

    /// Show `kind`; returns the markup to place in the body
    pub fn open(&mut self, kind: ModalKind) -> &'static str {
        log::debug!("Opening modal: {}", kind.as_str());
        self.kind = Some(kind);
        kind.body_html()
    }

    /// Hide and forget the current content. Returns `false` if already hidden.
    pub fn close(&mut self) -> bool {
        self.kind.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_names() {
        for kind in ModalKind::ALL {
            assert_eq!(ModalKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ModalKind::from_str(" Gallery "), Some(ModalKind::Gallery));
        assert_eq!(ModalKind::from_str("secret"), None);
    }

    #[test]
    fn test_only_video_has_video() {
        for kind in ModalKind::ALL {
            assert_eq!(kind.has_video(), kind.body_html().contains("<video"));
        }
    }

    #[test]
    fn test_overlay_open_close() {
        let mut overlay = Overlay::default();
        assert!(!overlay.is_visible());
        let html = overlay.open(ModalKind::Wish);
        assert!(html.contains("gentle with you"));
        assert_eq!(overlay.kind(), Some(ModalKind::Wish));

        // Opening another replaces the content
        overlay.open(ModalKind::Smile);
        assert_eq!(overlay.kind(), Some(ModalKind::Smile));

        assert!(overlay.close());
        assert!(!overlay.is_visible());
        assert!(!overlay.close());
    }
}
