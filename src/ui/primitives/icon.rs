use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Pending,
    Arrow,
    Deploy,
    Destroy,
    Doctor,
    Status,
    Init,
    Generate,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Progress) => theme::icons::PROGRESS,
            (true, Icon::Pending) => theme::icons::PENDING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Deploy) => theme::icons::DEPLOY,
            (true, Icon::Destroy) => theme::icons::DESTROY,
            (true, Icon::Doctor) => theme::icons::DOCTOR,
            (true, Icon::Status) => theme::icons::STATUS,
            (true, Icon::Init) => theme::icons::INIT,
            (true, Icon::Generate) => theme::icons::GENERATE,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Progress) => theme::icons_ascii::PROGRESS,
            (false, Icon::Pending) => theme::icons_ascii::PENDING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Deploy) => theme::icons_ascii::DEPLOY,
            (false, Icon::Destroy) => theme::icons_ascii::DESTROY,
            (false, Icon::Doctor) => theme::icons_ascii::DOCTOR,
            (false, Icon::Status) => theme::icons_ascii::STATUS,
            (false, Icon::Init) => theme::icons_ascii::INIT,
            (false, Icon::Generate) => theme::icons_ascii::GENERATE,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress | Icon::Destroy => theme::colors::WARNING,
            Icon::Pending | Icon::Arrow => theme::colors::DIM,
            Icon::Deploy | Icon::Doctor | Icon::Status | Icon::Init | Icon::Generate => {
                theme::colors::INFO
            }
        };
        format!("{}", s.with(color))
    }
}
