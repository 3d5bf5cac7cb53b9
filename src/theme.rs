//! ANSI styling for the chat transcript.

pub type StyleFn = fn(&str) -> String;

#[derive(Clone, Copy)]
pub struct Theme {
    pub heading: StyleFn,
    pub bold: StyleFn,
    pub italic: StyleFn,
    pub strikethrough: StyleFn,
    pub code: StyleFn,
    pub code_block_border: StyleFn,
    pub link: StyleFn,
    pub link_url: StyleFn,
    pub quote: StyleFn,
    pub quote_border: StyleFn,
    pub list_bullet: StyleFn,
    pub hr: StyleFn,
    pub user_label: StyleFn,
    pub assistant_label: StyleFn,
    pub system_label: StyleFn,
    pub error: StyleFn,
    pub dim: StyleFn,
}

impl Theme {
    pub fn ansi() -> Self {
        Self {
            heading: |text| sgr("1;35", text),
            bold: |text| sgr("1", text),
            italic: |text| sgr("3", text),
            strikethrough: |text| sgr("9", text),
            code: |text| sgr("33", text),
            code_block_border: |text| sgr("2", text),
            link: |text| sgr("4;34", text),
            link_url: |text| sgr("2", text),
            quote: |text| sgr("3;37", text),
            quote_border: |text| sgr("2", text),
            list_bullet: |text| sgr("36", text),
            hr: |text| sgr("2", text),
            user_label: |text| sgr("1;32", text),
            assistant_label: |text| sgr("1;36", text),
            system_label: |text| sgr("2", text),
            error: |text| sgr("1;31", text),
            dim: |text| sgr("2", text),
        }
    }

    pub fn plain() -> Self {
        Self {
            heading: identity,
            bold: identity,
            italic: identity,
            strikethrough: identity,
            code: |text| format!("`{text}`"),
            code_block_border: identity,
            link: identity,
            link_url: identity,
            quote: identity,
            quote_border: identity,
            list_bullet: identity,
            hr: identity,
            user_label: identity,
            assistant_label: identity,
            system_label: identity,
            error: identity,
            dim: identity,
        }
    }

    pub fn for_output(color: bool) -> Self {
        if color {
            Self::ansi()
        } else {
            Self::plain()
        }
    }
}

fn sgr(code: &str, text: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn identity(text: &str) -> String {
    text.to_string()
}
