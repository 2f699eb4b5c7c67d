//! Instances: mutable per-use copies of loaded resources

use std::fmt;

use crate::command::ActionCall;
use crate::geometry::{Align, Color, ColorSet, Point, Rect, Size};
use crate::registry::decode::DEFAULT_FONT_SIZE;
use crate::render::Canvas;
use crate::resource::{FontData, ImageFrame, MusicTrack, ResourceData, ResourceEntry, SoundClip};

/// Unique identifier of an instance within its manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Frame state of an animated image sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<ImageFrame>,
    frame_duration: u32,
    current: usize,
    elapsed: u32,
}

impl Animation {
    pub fn new(frames: Vec<ImageFrame>, frame_duration: u32) -> Self {
        Self {
            frames,
            frame_duration,
            current: 0,
            elapsed: 0,
        }
    }

    /// Advance by `dt_ms`; moves at most one frame per call
    pub fn advance(&mut self, dt_ms: u32) {
        if self.frames.is_empty() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt_ms);
        if self.elapsed >= self.frame_duration {
            self.elapsed = 0;
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&ImageFrame> {
        self.frames.get(self.current)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }
}

/// What an instance shows (or plays)
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    /// Text-only (fonts)
    None,
    Image(ImageFrame),
    Sequence(Animation),
    Shape { border_size: i32, border_radius: i32 },
    Music(MusicTrack),
    Sound(SoundClip),
}

/// A live object created from a resource entry
///
/// Every field is owned by the instance; pixel and audio buffers are shared
/// read-only with the entry. Setters recompute the derived rectangles from the
/// instance's own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    id: InstanceId,
    name: String,
    type_tag: String,
    pos: Point,
    size: Size,
    align: Align,
    rect: Rect,
    /// Collision area relative to the rect origin, when it differs from the rect
    hit_area: Option<Rect>,
    text: Option<String>,
    font: Option<FontData>,
    font_size: f32,
    text_color: Color,
    text_rect: Rect,
    colors: ColorSet,
    fill: Color,
    active: bool,
    action: Option<ActionCall>,
    graphic: Graphic,
}

impl Instance {
    /// Build the initial state for `entry`
    pub fn from_entry(id: InstanceId, entry: &ResourceEntry) -> Self {
        let placement = &entry.placement;

        let mut font = None;
        let mut colors = ColorSet::default();
        let mut shape_origin = None;
        let mut hit_area = None;
        let graphic = match &entry.data {
            ResourceData::Image(frame) => Graphic::Image(frame.clone()),
            ResourceData::ImageSequence {
                frames,
                frame_duration,
            } => Graphic::Sequence(Animation::new(frames.clone(), *frame_duration)),
            ResourceData::Font(data) => {
                font = Some(data.clone());
                Graphic::None
            }
            ResourceData::Music(track) => Graphic::Music(track.clone()),
            ResourceData::Sound(clip) => Graphic::Sound(clip.clone()),
            ResourceData::Shape(shape) => {
                colors = shape.colors;
                shape_origin = Some(shape.rect.origin());
                if shape.hit_rect != shape.rect {
                    hit_area = Some(Rect::new(
                        shape.hit_rect.x.saturating_sub(shape.rect.x),
                        shape.hit_rect.y.saturating_sub(shape.rect.y),
                        shape.hit_rect.width,
                        shape.hit_rect.height,
                    ));
                }
                Graphic::Shape {
                    border_size: shape.border_size,
                    border_radius: shape.border_radius,
                }
            }
        };

        let size = placement
            .size
            .or_else(|| entry.data.natural_size())
            .unwrap_or_default();
        let pos = placement.pos.or(shape_origin).unwrap_or_default();
        let font_size = font.as_ref().map_or(DEFAULT_FONT_SIZE, |f| f.point_size);
        let text_color = font.as_ref().map_or(Color::WHITE, |f| f.color);

        let mut instance = Self {
            id,
            name: entry.name.clone(),
            type_tag: entry.type_tag.clone(),
            pos,
            size,
            align: placement.align,
            rect: Rect::default(),
            hit_area,
            text: placement.text.clone(),
            font,
            font_size,
            text_color,
            text_rect: Rect::default(),
            colors,
            fill: colors.inactive,
            active: false,
            action: placement.action.clone(),
            graphic,
        };
        instance.recompute();
        instance
    }

    fn recompute(&mut self) {
        self.rect = Rect::anchored(self.pos, self.size, self.align);
        self.text_rect = match (&self.font, &self.text) {
            (Some(font), Some(text)) => {
                let measured = font.measure(text, self.font_size);
                if self.size == Size::default() {
                    // sizeless text instances anchor the text itself
                    Rect::anchored(self.pos, measured, self.align)
                } else {
                    self.rect.centered(measured)
                }
            }
            _ => Rect::from_parts(self.rect.center(), Size::default()),
        };
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Name of the entry this instance was created from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Collision area; follows the rect when the instance moves
    pub fn hit_rect(&self) -> Rect {
        match self.hit_area {
            Some(area) => Rect::new(
                self.rect.x.saturating_add(area.x),
                self.rect.y.saturating_add(area.y),
                area.width,
                area.height,
            ),
            None => self.rect,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn text_rect(&self) -> Rect {
        self.text_rect
    }

    pub fn font(&self) -> Option<&FontData> {
        self.font.as_ref()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn colors(&self) -> ColorSet {
        self.colors
    }

    /// Current fill color, following the active state
    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Button action, if the entry declared one
    pub fn action(&self) -> Option<&ActionCall> {
        self.action.as_ref()
    }

    pub fn graphic(&self) -> &Graphic {
        &self.graphic
    }

    /// Index of the frame currently shown, for image sequences
    pub fn current_frame(&self) -> Option<usize> {
        match &self.graphic {
            Graphic::Sequence(animation) => Some(animation.current_index()),
            _ => None,
        }
    }

    /// Audio handle for music instances
    pub fn music(&self) -> Option<&MusicTrack> {
        match &self.graphic {
            Graphic::Music(track) => Some(track),
            _ => None,
        }
    }

    /// Audio handle for sound instances
    pub fn sound(&self) -> Option<&SoundClip> {
        match &self.graphic {
            Graphic::Sound(clip) => Some(clip),
            _ => None,
        }
    }

    pub fn set_position(&mut self, pos: Point) {
        self.pos = pos;
        self.recompute();
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.recompute();
    }

    /// Place the instance so that its rect becomes exactly `rect`
    ///
    /// The position is stored relative to the current anchor.
    pub fn set_rect(&mut self, rect: Rect) {
        self.size = rect.size();
        self.pos = rect.anchor_point(self.align);
        self.recompute();
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
        self.recompute();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.recompute();
    }

    pub fn clear_text(&mut self) {
        self.text = None;
        self.recompute();
    }

    /// Switch fonts, adopting the font's point size and color
    pub fn set_font(&mut self, font: FontData) {
        self.font_size = font.point_size;
        self.text_color = font.color;
        self.font = Some(font);
        self.recompute();
    }

    /// Change the point size; sizes below 1 are clamped
    pub fn set_font_size(&mut self, point_size: f32) {
        self.font_size = point_size.max(1.0);
        self.recompute();
    }

    /// Replace the shape colors
    pub fn set_color(&mut self, colors: ColorSet) {
        self.colors = colors;
        self.fill = if self.active {
            colors.active
        } else {
            colors.inactive
        };
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.fill = if active {
            self.colors.active
        } else {
            self.colors.inactive
        };
    }

    /// Advance time-based state by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: u32) {
        if let Graphic::Sequence(animation) = &mut self.graphic {
            animation.advance(dt_ms);
        }
    }

    /// Hit test against the current rect
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    /// Whether the collision area overlaps `other`
    pub fn collides_with(&self, other: &Rect) -> bool {
        self.hit_rect().intersects(other)
    }

    /// Draw the graphic, then the text, from this instance's own fields
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match &self.graphic {
            Graphic::Image(frame) => canvas.blit(frame, self.rect),
            Graphic::Sequence(animation) => {
                if let Some(frame) = animation.current_frame() {
                    canvas.blit(frame, self.rect);
                }
            }
            Graphic::Shape {
                border_size,
                border_radius,
            } => {
                canvas.fill_rect(self.rect, self.fill, *border_radius);
                canvas.stroke_rect(self.rect, self.colors.border, *border_size, *border_radius);
            }
            Graphic::None | Graphic::Music(_) | Graphic::Sound(_) => {}
        }

        if let (Some(font), Some(text)) = (&self.font, &self.text) {
            canvas.text(text, font, self.font_size, self.text_color, self.text_rect);
        }
    }
}
