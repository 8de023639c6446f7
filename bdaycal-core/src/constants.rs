/// Text appended to the contact name in every event title.
pub const DEFAULT_TITLE_SUFFIX: &str = "Geburtstag";

/// Value written to the calendar's PRODID property.
pub const PRODID: &str = "-//bdaycal//birthdays//EN";

/// Name of the directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "bdaycal";
