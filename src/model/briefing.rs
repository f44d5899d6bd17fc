//! Scripted briefings: a timed event stream plus tag/caption string tables.

/// Briefing event kind with its parameter count. On disk an event is
/// `[time, code, params...]` in a flat i16 stream closed by the `0x270F`
/// end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    PageBreak = 3,
    /// Param: caption table index shown as the page title.
    TitleText = 4,
    /// Param: caption table index.
    CaptionText = 5,
    /// Params: map x, map y.
    MoveMap = 6,
    /// Params: zoom x, zoom y.
    ZoomMap = 7,
    ClearTags = 8,
    /// Params: tag slot (0..=3), flight-group index.
    FlightGroupTag = 9,
    /// Params: tag table index, x, y, color.
    TextTag = 10,
}

impl EventKind {
    pub fn from_raw(raw: i16) -> Option<EventKind> {
        match raw {
            3 => Some(EventKind::PageBreak),
            4 => Some(EventKind::TitleText),
            5 => Some(EventKind::CaptionText),
            6 => Some(EventKind::MoveMap),
            7 => Some(EventKind::ZoomMap),
            8 => Some(EventKind::ClearTags),
            9 => Some(EventKind::FlightGroupTag),
            10 => Some(EventKind::TextTag),
            _ => None,
        }
    }

    pub fn raw(self) -> i16 {
        self as i16
    }

    pub fn param_count(self) -> usize {
        match self {
            EventKind::PageBreak | EventKind::ClearTags => 0,
            EventKind::TitleText | EventKind::CaptionText => 1,
            EventKind::MoveMap | EventKind::ZoomMap | EventKind::FlightGroupTag => 2,
            EventKind::TextTag => 4,
        }
    }
}

/// One timed briefing event.
#[derive(Debug, Clone, PartialEq)]
pub struct BriefingEvent {
    /// Briefing ticks from the start.
    pub time: u16,
    pub kind: EventKind,
    pub params: [i16; 4],
}

impl BriefingEvent {
    pub fn new(time: u16, kind: EventKind, params: &[i16]) -> Self {
        let mut p = [0i16; 4];
        p[..params.len().min(4)].copy_from_slice(&params[..params.len().min(4)]);
        BriefingEvent { time, kind, params: p }
    }

    /// i16 units this event occupies in the flat stream (time + code + params).
    pub fn stream_len(&self) -> usize {
        2 + self.kind.param_count()
    }
}

/// One scripted briefing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Briefing {
    /// Total run length in ticks.
    pub length_ticks: u16,
    pub events: Vec<BriefingEvent>,
    pub tags: Vec<String>,
    pub captions: Vec<String>,
}

impl Briefing {
    /// End marker closing the on-disk event stream.
    pub const END_MARKER: i16 = 0x270F;

    /// i16 units the event stream occupies on disk, end marker included.
    pub fn stream_shorts(&self) -> usize {
        self.events.iter().map(BriefingEvent::stream_len).sum::<usize>() + 2
    }
}
