use std::fmt;

/// Column headers of the exported table, in order.
pub const COLUMNS: [&str; 10] = [
    "Source",
    "Job Title",
    "Company",
    "Salary",
    "City",
    "Country",
    "Remote",
    "Tech Stack",
    "Date Posted",
    "Link",
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Remote {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Remote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Remote::Yes => "Yes",
            Remote::No => "No",
            Remote::Unknown => "",
        }
    }
}

impl From<bool> for Remote {
    fn from(remote: bool) -> Self {
        if remote {
            Remote::Yes
        } else {
            Remote::No
        }
    }
}

impl From<&str> for Remote {
    fn from(remote: &str) -> Self {
        match remote {
            "Yes" => Remote::Yes,
            "No" => Remote::No,
            _ => Remote::Unknown,
        }
    }
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One job offer in the shape shared by every source.
///
/// Missing values are empty strings, never absent. `title` is guaranteed
/// non-empty by the sources that build it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub source: String,
    pub title: String,
    pub company: String,
    pub salary: String,
    pub city: String,
    pub country: String,
    pub remote: Remote,
    pub tech_stack: String,
    pub date_posted: String,
    pub link: String,
}

impl JobPosting {
    /// Cell values in [`COLUMNS`] order.
    pub fn row(&self) -> [&str; 10] {
        [
            self.source.as_str(),
            self.title.as_str(),
            self.company.as_str(),
            self.salary.as_str(),
            self.city.as_str(),
            self.country.as_str(),
            self.remote.as_str(),
            self.tech_stack.as_str(),
            self.date_posted.as_str(),
            self.link.as_str(),
        ]
    }
}
