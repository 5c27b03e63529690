use std::fmt;

use crate::image_pipeline::caps::types::{Framerate, StreamKind};
use crate::image_pipeline::caps::value::CapsValue;

/// One candidate stream description.
///
/// A `None` field is unconstrained: it intersects with anything and is
/// taken over from the other side.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamCaps {
    pub kind: StreamKind,
    /// `GRAY8` on the raw side, a CFA tag on the Bayer side
    pub format: Option<CapsValue<String>>,
    pub width: Option<CapsValue<u32>>,
    pub height: Option<CapsValue<u32>>,
    pub framerate: Option<CapsValue<Framerate>>,
    pub colorimetry: Option<String>,
    pub chroma_site: Option<String>,
}

impl StreamCaps {
    pub fn new(kind: StreamKind) -> Self {
        Self {
            kind,
            format: None,
            width: None,
            height: None,
            framerate: None,
            colorimetry: None,
            chroma_site: None,
        }
    }

    /// Structure with fixed width and height and nothing else.
    pub fn sized(kind: StreamKind, width: u32, height: u32) -> Self {
        Self::new(kind)
            .with_width(CapsValue::Fixed(width))
            .with_height(CapsValue::Fixed(height))
    }

    pub fn with_format(mut self, format: CapsValue<String>) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_format_str(self, format: &str) -> Self {
        self.with_format(CapsValue::Fixed(format.to_string()))
    }

    pub fn with_width(mut self, width: CapsValue<u32>) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: CapsValue<u32>) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_framerate(mut self, framerate: CapsValue<Framerate>) -> Self {
        self.framerate = Some(framerate);
        self
    }

    pub fn with_colorimetry(mut self, colorimetry: impl Into<String>) -> Self {
        self.colorimetry = Some(colorimetry.into());
        self
    }

    pub fn with_chroma_site(mut self, chroma_site: impl Into<String>) -> Self {
        self.chroma_site = Some(chroma_site.into());
        self
    }

    pub fn fixed_width(&self) -> Option<u32> {
        self.width.as_ref().and_then(|w| w.fixed()).copied()
    }

    pub fn fixed_height(&self) -> Option<u32> {
        self.height.as_ref().and_then(|h| h.fixed()).copied()
    }

    pub fn fixed_format(&self) -> Option<&str> {
        self.format.as_ref().and_then(|f| f.fixed()).map(String::as_str)
    }

    pub fn fixed_framerate(&self) -> Option<Framerate> {
        self.framerate.as_ref().and_then(|r| r.fixed()).copied()
    }

    /// True when every present field admits a single value.
    pub fn is_fixed(&self) -> bool {
        self.format.as_ref().is_none_or(CapsValue::is_fixed)
            && self.width.as_ref().is_none_or(CapsValue::is_fixed)
            && self.height.as_ref().is_none_or(CapsValue::is_fixed)
            && self.framerate.as_ref().is_none_or(CapsValue::is_fixed)
    }

    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.kind != other.kind {
            return None;
        }
        Some(Self {
            kind: self.kind,
            format: intersect_field(&self.format, &other.format)?,
            width: intersect_field(&self.width, &other.width)?,
            height: intersect_field(&self.height, &other.height)?,
            framerate: intersect_field(&self.framerate, &other.framerate)?,
            colorimetry: intersect_tag(&self.colorimetry, &other.colorimetry)?,
            chroma_site: intersect_tag(&self.chroma_site, &other.chroma_site)?,
        })
    }

    /// Narrow every present field to a single value.
    pub fn fixate(&self) -> Self {
        fn fix<T: Clone + PartialOrd>(field: &Option<CapsValue<T>>) -> Option<CapsValue<T>> {
            field.as_ref().and_then(|v| v.fixate()).map(CapsValue::Fixed)
        }
        Self {
            kind: self.kind,
            format: fix(&self.format),
            width: fix(&self.width),
            height: fix(&self.height),
            framerate: fix(&self.framerate),
            colorimetry: self.colorimetry.clone(),
            chroma_site: self.chroma_site.clone(),
        }
    }
}

fn intersect_field<T: Clone + PartialOrd>(
    a: &Option<CapsValue<T>>,
    b: &Option<CapsValue<T>>,
) -> Option<Option<CapsValue<T>>> {
    match (a, b) {
        (None, None) => Some(None),
        (Some(v), None) | (None, Some(v)) => Some(Some(v.clone())),
        (Some(x), Some(y)) => x.intersect(y).map(Some),
    }
}

fn intersect_tag(a: &Option<String>, b: &Option<String>) -> Option<Option<String>> {
    match (a, b) {
        (Some(x), Some(y)) if x != y => None,
        (Some(v), _) | (None, Some(v)) => Some(Some(v.clone())),
        (None, None) => Some(None),
    }
}

impl fmt::Display for StreamCaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(format) = &self.format {
            write!(f, ", format=(string){format}")?;
        }
        if let Some(width) = &self.width {
            write!(f, ", width=(int){width}")?;
        }
        if let Some(height) = &self.height {
            write!(f, ", height=(int){height}")?;
        }
        if let Some(framerate) = &self.framerate {
            write!(f, ", framerate=(fraction){framerate}")?;
        }
        if let Some(colorimetry) = &self.colorimetry {
            write!(f, ", colorimetry=(string){colorimetry}")?;
        }
        if let Some(chroma_site) = &self.chroma_site {
            write!(f, ", chroma-site=(string){chroma_site}")?;
        }
        Ok(())
    }
}

/// An ordered set of candidate structures, most preferred first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Caps(Vec<StreamCaps>);

impl Caps {
    pub fn new_empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&StreamCaps> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StreamCaps> {
        self.0.iter()
    }

    /// Appends `structure` unless an equal one is already present.
    pub fn push(&mut self, structure: StreamCaps) {
        if !self.0.contains(&structure) {
            self.0.push(structure);
        }
    }

    /// Intersection ordered by `self`'s preference: for each structure of
    /// `self` in turn, every compatible structure of `other`.
    pub fn intersect_first(&self, other: &Caps) -> Caps {
        let mut result = Caps::new_empty();
        for preferred in &self.0 {
            for candidate in &other.0 {
                if let Some(common) = preferred.intersect(candidate) {
                    result.push(common);
                }
            }
        }
        result
    }

    pub fn can_intersect(&self, other: &Caps) -> bool {
        self.0
            .iter()
            .any(|a| other.0.iter().any(|b| a.intersect(b).is_some()))
    }

    /// First structure narrowed to single values.
    pub fn fixate(&self) -> Option<StreamCaps> {
        self.first().map(StreamCaps::fixate)
    }
}

impl From<StreamCaps> for Caps {
    fn from(structure: StreamCaps) -> Self {
        Self(vec![structure])
    }
}

impl FromIterator<StreamCaps> for Caps {
    fn from_iter<I: IntoIterator<Item = StreamCaps>>(iter: I) -> Self {
        let mut caps = Caps::new_empty();
        for structure in iter {
            caps.push(structure);
        }
        caps
    }
}

impl<'a> IntoIterator for &'a Caps {
    type Item = &'a StreamCaps;
    type IntoIter = std::slice::Iter<'a, StreamCaps>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Caps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("EMPTY");
        }
        for (i, structure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{structure}")?;
        }
        Ok(())
    }
}
