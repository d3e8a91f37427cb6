// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Data Organizer";
pub const EN_UNTITLED_CASE: &str = "Untitled Case";

pub const EN_MENU_FILE: &str = "File";
pub const EN_MENU_EXPORT: &str = "Export";
pub const EN_BTN_NEW_CASE: &str = "New Case";
pub const EN_BTN_OPEN_CASE: &str = "Open Case...";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_EXIT: &str = "Exit";
pub const EN_BTN_EXPORT_ENTITIES: &str = "Export Entities to CSV...";
pub const EN_BTN_EXPORT_EVENTS: &str = "Export Events to CSV...";
pub const EN_BTN_EXPORT_RESOURCES: &str = "Export Resources to CSV...";

pub const EN_BTN_OPEN_MEDIA: &str = "Open Media...";
pub const EN_BTN_PLAY: &str = "Play";
pub const EN_BTN_PAUSE: &str = "Pause";
pub const EN_BTN_ADD_TIMESTAMP: &str = "Add Timestamp";
pub const EN_BTN_ADD_ENTITY: &str = "Add Entity";
pub const EN_BTN_LOG_EVENT: &str = "Log Event";
pub const EN_BTN_ADD_RESOURCE: &str = "Add Resource";
pub const EN_BTN_REMOVE_SELECTED: &str = "Remove Selected Row(s)";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_HEADING_MEDIA: &str = "Media";
pub const EN_HEADING_CASE_INFO: &str = "Case Information";
pub const EN_LABEL_CASE_NAME: &str = "Case Name:";
pub const EN_LABEL_SUBJECT_TARGET: &str = "Subject/Target:";
pub const EN_HINT_NOTES: &str = "Enter observations, notes, and analysis here...";

pub const EN_TAB_NOTES: &str = "Notes";
pub const EN_TAB_ENTITIES: &str = "Entities";
pub const EN_TAB_EVENTS: &str = "Event Timeline";
pub const EN_TAB_RESOURCES: &str = "Web Resources";

pub const EN_MEDIA_NONE: &str = "Open a video or image file to begin";
pub const EN_MEDIA_VIDEO: &str = "Video";
pub const EN_MEDIA_IMAGE: &str = "Image";
pub const EN_MEDIA_UNSUPPORTED: &str = "The selected file format is not supported.";
pub const EN_TIME_PLACEHOLDER: &str = "--:--:--";

pub const EN_STATUS_READY: &str = "Ready. Create a new case or open an existing one to begin.";
pub const EN_STATUS_NEW_CASE: &str = "New case created.";
pub const EN_BADGE_MODIFIED: &str = "Modified";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<unsaved>";

pub const EN_PROMPT_MODIFIED: &str =
    "The case has been modified.\nDo you want to save your changes?";

pub const EN_FILTER_CASE: &str = "Data Organizer Case";
pub const EN_FILTER_CSV: &str = "CSV Files";
pub const EN_FILTER_MEDIA: &str = "All Media Files";
pub const EN_FILTER_ALL: &str = "All Files";

// Table column headers. Persisted files carry no headers; these are the only
// definition of the column layout.
pub const EN_COL_TIMESTAMP: &str = "Timestamp";
pub const EN_COL_ENTITY_NAME: &str = "Entity Name";
pub const EN_COL_TYPE: &str = "Type";
pub const EN_COL_NOTES: &str = "Notes";
pub const EN_COL_START_TIME: &str = "Start Time";
pub const EN_COL_END_TIME: &str = "End Time";
pub const EN_COL_EVENT_DESCRIPTION: &str = "Event Description";
pub const EN_COL_URL_PATH: &str = "URL / File Path";
pub const EN_COL_DESCRIPTION: &str = "Description";
pub const EN_COL_DATE_ACCESSED: &str = "Date Accessed";

// Case file keys.
pub const KEY_CASE_NAME: &str = "caseName";
pub const KEY_SUBJECT_TARGET: &str = "subjectTarget";
pub const KEY_NOTES: &str = "notes";
pub const KEY_ENTITIES: &str = "entities";
pub const KEY_EVENTS: &str = "events";
pub const KEY_RESOURCES: &str = "resources";

pub const CASE_EXTENSION: &str = "osintcase";
pub const CSV_EXTENSION: &str = "csv";
pub const EXPORT_FALLBACK_STEM: &str = "export";

// chrono format for the resources "Date Accessed" column.
pub const DATE_ACCESSED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv"];
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

pub const DEFAULT_CONFIG_FILE: &str = "data-organizer.json";
