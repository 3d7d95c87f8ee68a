use ratatui::style::Color;

/// Icon category for a workspace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    FolderOpen,
    Pdf,
    Word,
    Spreadsheet,
    Presentation,
    Image,
    Text,
    Archive,
    Other,
}

impl FileKind {
    /// Pick the icon for a file name. Extension matching is case-insensitive.
    pub fn detect(filename: &str, is_folder: bool, is_open: bool) -> Self {
        if is_folder {
            return if is_open { Self::FolderOpen } else { Self::Folder };
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Word,
            "xls" | "xlsx" | "csv" => Self::Spreadsheet,
            "ppt" | "pptx" => Self::Presentation,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" => Self::Image,
            "txt" | "log" | "md" => Self::Text,
            "zip" | "rar" | "7z" | "tar" | "gz" => Self::Archive,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "[DIR]",
            Self::FolderOpen => "[DIR]▾",
            Self::Pdf => "[PDF]",
            Self::Word => "[DOC]",
            Self::Spreadsheet => "[XLS]",
            Self::Presentation => "[PPT]",
            Self::Image => "[IMG]",
            Self::Text => "[TXT]",
            Self::Archive => "[ZIP]",
            Self::Other => "[FILE]",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Folder | Self::FolderOpen => Color::Yellow,
            Self::Pdf => Color::Red,
            Self::Word => Color::Blue,
            Self::Spreadsheet => Color::Green,
            Self::Presentation => Color::LightRed,
            Self::Image => Color::Magenta,
            Self::Text => Color::Gray,
            Self::Archive => Color::LightYellow,
            Self::Other => Color::DarkGray,
        }
    }
}
