/// An opening fence line: the fence run as written plus its info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    pub fence: &'a str,
    pub info: &'a str,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn open(line: &str) -> Option<FenceOpen<'_>> {
        let t = line.trim_end_matches(['\r', '\n']);
        let c = if t.starts_with(Self::BACKTICKS) {
            '`'
        } else if t.starts_with(Self::TILDES) {
            '~'
        } else {
            return None;
        };
        let len = t.chars().take_while(|&x| x == c).count();
        let (fence, rest) = t.split_at(len);
        let info = rest.trim();
        // A backtick fence's info string may not contain backticks.
        if c == '`' && info.contains('`') {
            return None;
        }
        Some(FenceOpen { fence, info })
    }

    /// Whether `line` closes a block opened with `fence`.
    pub fn closes(fence: &str, line: &str) -> bool {
        let Some(c) = fence.chars().next() else {
            return false;
        };
        let t = line.trim_end();
        let len = t.chars().take_while(|&x| x == c).count();
        len >= fence.len() && len == t.chars().count()
    }

    /// `fence`, lengthened until no line of `content` would close it.
    pub fn fence_for(fence: &str, content: &str) -> String {
        let Some(c) = fence.chars().next() else {
            return Self::BACKTICKS.to_string();
        };
        let longest = content
            .split('\n')
            .map(str::trim_end)
            .filter(|t| !t.is_empty() && t.chars().all(|x| x == c))
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(0);
        let len = fence.chars().count().max(longest + 1);
        c.to_string().repeat(len)
    }
}
