/// One discrete step of the redundancy reveal.
///
/// Variants are declared in reveal order; `Ord` follows that order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// Nothing revealed.
    #[default]
    Idle,
    /// Transmission-line paths are drawn.
    LinesVisible,
    /// Substation markers are shown.
    MarkersVisible,
    /// Connections between sources and substations are shown.
    ConnectionsVisible,
    /// The 2N+1 summary panel is shown. Terminal for a run.
    InfoPanelVisible,
}

impl RevealPhase {
    /// Timed phases in the order a single run fires them.
    pub const TIMED: [RevealPhase; 4] = [
        RevealPhase::LinesVisible,
        RevealPhase::MarkersVisible,
        RevealPhase::ConnectionsVisible,
        RevealPhase::InfoPanelVisible,
    ];

    /// Position in the reveal order, `Idle` being 0.
    pub fn step(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::LinesVisible => 1,
            Self::MarkersVisible => 2,
            Self::ConnectionsVisible => 3,
            Self::InfoPanelVisible => 4,
        }
    }

    /// Phase that follows `self` in a run, if any.
    pub fn next(self) -> Option<RevealPhase> {
        match self {
            Self::Idle => Some(Self::LinesVisible),
            Self::LinesVisible => Some(Self::MarkersVisible),
            Self::MarkersVisible => Some(Self::ConnectionsVisible),
            Self::ConnectionsVisible => Some(Self::InfoPanelVisible),
            Self::InfoPanelVisible => None,
        }
    }

    /// Return `true` once `self` has reached `other` in reveal order.
    pub fn reached(self, other: RevealPhase) -> bool {
        self >= other
    }

    /// Return `true` when this is the terminal phase of a run.
    pub fn is_terminal(self) -> bool {
        self == Self::InfoPanelVisible
    }
}
