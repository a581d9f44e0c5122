//! Media markers owned by the host.
//!
//! A marker without a length is a point marker (a time tag); with a length it
//! is a range marker (a section tag). The timeline reads markers but never
//! adds or removes them; it asks the host to through modification requests.

use std::time::Duration;

use uuid::Uuid;

/// Name given to an unnamed range marker when its length is set.
pub const DEFAULT_RANGE_NAME: &str = "Section Tag";
/// Name given to an unnamed point marker when its length is cleared.
pub const DEFAULT_POINT_NAME: &str = "Time Tag";

/// Marker properties whose change the timeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerProperty {
    StartTime,
    Length,
    Name,
    Description,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMarker {
    id: Uuid,
    /// Distinguishes call start, call end, section tags, time tags and so on.
    type_key: String,
    start_time: Duration,
    length: Option<Duration>,
    name: String,
    description: String,
    is_read_only: bool,
    is_system_tag: bool,
    is_visible: bool,
    is_dirty: bool,
}

impl MediaMarker {
    /// Create an empty point marker at zero.
    pub fn new(id: Uuid, type_key: impl Into<String>, is_read_only: bool) -> Self {
        Self {
            id,
            type_key: type_key.into(),
            start_time: Duration::ZERO,
            length: None,
            name: String::new(),
            description: String::new(),
            is_read_only,
            is_system_tag: false,
            is_visible: true,
            is_dirty: false,
        }
    }

    /// Create a fully described marker. The result is not dirty.
    #[allow(clippy::too_many_arguments)]
    pub fn with_details(
        id: Uuid,
        type_key: impl Into<String>,
        is_read_only: bool,
        start_time: Duration,
        length: Option<Duration>,
        name: impl Into<String>,
        description: impl Into<String>,
        is_system_tag: bool,
    ) -> Self {
        let mut marker = Self::new(id, type_key, is_read_only);
        marker.name = name.into();
        marker.start_time = start_time;
        marker.set_length(length);
        marker.description = description.into();
        marker.is_system_tag = is_system_tag;
        marker.is_dirty = false;
        marker
    }

    /// Point marker with a fresh id.
    pub fn point(start_time: Duration, description: impl Into<String>) -> Self {
        Self::with_details(
            Uuid::new_v4(),
            "time-tag",
            false,
            start_time,
            None,
            "",
            description,
            false,
        )
    }

    /// Range marker with a fresh id.
    pub fn range(start_time: Duration, length: Duration, description: impl Into<String>) -> Self {
        Self::with_details(
            Uuid::new_v4(),
            "section-tag",
            false,
            start_time,
            Some(length),
            "",
            description,
            false,
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    pub fn set_type_key(&mut self, type_key: impl Into<String>) {
        self.type_key = type_key.into();
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    pub fn set_start_time(&mut self, start_time: Duration) -> bool {
        if self.start_time == start_time {
            return false;
        }
        self.start_time = start_time;
        self.is_dirty = true;
        true
    }

    pub fn length(&self) -> Option<Duration> {
        self.length
    }

    /// Set or clear the length. An unnamed marker picks up the default name
    /// for its new kind.
    pub fn set_length(&mut self, length: Option<Duration>) -> bool {
        if self.name.is_empty() {
            self.set_name(if length.is_some() {
                DEFAULT_RANGE_NAME
            } else {
                DEFAULT_POINT_NAME
            });
        }
        if self.length == length {
            return false;
        }
        self.length = length;
        self.is_dirty = true;
        true
    }

    /// End of a range marker; the start time for a point marker.
    pub fn end_time(&self) -> Duration {
        self.start_time
            .saturating_add(self.length.unwrap_or_default())
    }

    pub fn is_range(&self) -> bool {
        self.length.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name == name {
            return false;
        }
        self.name = name;
        self.is_dirty = true;
        true
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        if self.description == description {
            return false;
        }
        self.description = description;
        self.is_dirty = true;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.is_visible != visible;
        self.is_visible = visible;
        changed
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    pub fn is_system_tag(&self) -> bool {
        self.is_system_tag
    }

    /// True once start time, length, name or description changed.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Forget pending changes, typically after the host persisted them.
    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }
}
