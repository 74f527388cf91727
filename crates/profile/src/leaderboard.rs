//! Class and school leaderboards over a seeded roster plus the player.

use crate::profile::Profile;

/// Id given to the player's own row.
pub const PLAYER_ID: &str = "me";

const DEFAULT_CLASS: &str = "10-A";
const DEFAULT_SCHOOL: &str = "Your School";
const DEFAULT_PLAYER_NAME: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub school: String,
    pub xp: u32,
}

impl Student {
    fn seed(id: &str, name: &str, class_name: &str, school: &str, xp: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class_name: class_name.to_string(),
            school: school.to_string(),
            xp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStudent {
    /// 1-based.
    pub rank: usize,
    pub student: Student,
    pub is_player: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Class,
    School,
}

impl Scope {
    pub fn toggle(self) -> Self {
        match self {
            Scope::Class => Scope::School,
            Scope::School => Scope::Class,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Class => "class",
            Scope::School => "school",
        }
    }
}

/// The demo roster shipped with the arcade.
pub fn roster() -> Vec<Student> {
    vec![
        Student::seed("1", "Srinidhi", "10-A", "Kennedy", 3120),
        Student::seed("2", "Mitesh", "10-A", "Kennedy", 2890),
        Student::seed("3", "Aakanksha", "9-B", "Kennedy", 1980),
        Student::seed("4", "Lalith", "9-B", "Little Angels", 2440),
        Student::seed("5", "Spandhan", "10-A", "Little Angels", 3310),
        Student::seed("6", "Rupak", "8-C", "Little Angels", 1730),
        Student::seed("7", "Zoya I.", "10-A", "Silver Oaks", 2650),
        Student::seed("8", "Kabir T.", "9-B", "Silver Oaks", 2205),
        Student::seed("9", "Meera P.", "9-B", "Kennedy", 1980),
    ]
}

/// Sort by XP, highest first, keeping roster order for ties, and number
/// the rows.
pub fn rank_by_xp(mut students: Vec<Student>, player: Option<&str>) -> Vec<RankedStudent> {
    students.sort_by(|a, b| b.xp.cmp(&a.xp));
    students
        .into_iter()
        .enumerate()
        .map(|(i, student)| {
            let is_player = student.id == PLAYER_ID || player.is_some_and(|n| n == student.name);
            RankedStudent {
                rank: i + 1,
                student,
                is_player,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    students: Vec<Student>,
    player: Option<Student>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(roster())
    }
}

impl Leaderboard {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students,
            player: None,
        }
    }

    /// Put the player on the board. A roster entry with the same name keeps
    /// the higher XP of the two; otherwise the player is appended.
    pub fn merge_player(&mut self, profile: &Profile) {
        let name = match profile.name.trim() {
            "" => DEFAULT_PLAYER_NAME.to_string(),
            n => n.to_string(),
        };
        let me = Student {
            id: PLAYER_ID.to_string(),
            name,
            class_name: profile
                .class_name
                .clone()
                .unwrap_or_else(|| DEFAULT_CLASS.to_string()),
            school: profile
                .school
                .clone()
                .unwrap_or_else(|| DEFAULT_SCHOOL.to_string()),
            xp: profile.xp,
        };
        match self.students.iter_mut().find(|s| s.name == me.name) {
            Some(existing) => existing.xp = existing.xp.max(me.xp),
            None => self.students.push(me.clone()),
        }
        self.player = Some(me);
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn player(&self) -> Option<&Student> {
        self.player.as_ref()
    }

    /// Distinct class names, in roster order.
    pub fn classes(&self) -> Vec<&str> {
        distinct(self.students.iter().map(|s| s.class_name.as_str()))
    }

    /// Distinct schools, in roster order.
    pub fn schools(&self) -> Vec<&str> {
        distinct(self.students.iter().map(|s| s.school.as_str()))
    }

    /// Choices for a scope's selector.
    pub fn groups(&self, scope: Scope) -> Vec<&str> {
        match scope {
            Scope::Class => self.classes(),
            Scope::School => self.schools(),
        }
    }

    /// Rows in the selected class or school, narrowed by a case-insensitive
    /// name query, ranked.
    pub fn rank(&self, scope: Scope, group: &str, query: &str) -> Vec<RankedStudent> {
        let query = query.trim().to_lowercase();
        let rows = self
            .students
            .iter()
            .filter(|s| match scope {
                Scope::Class => s.class_name == group,
                Scope::School => s.school == group,
            })
            .filter(|s| query.is_empty() || s.name.to_lowercase().contains(&query))
            .cloned()
            .collect();
        rank_by_xp(rows, self.player.as_ref().map(|p| p.name.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::Avatar;

    fn player(name: &str, xp: u32) -> Profile {
        let mut p = Profile::new(name, "p@x", Avatar::default());
        p.xp = xp;
        p.class_name = Some("10-A".into());
        p.school = Some("Kennedy".into());
        p
    }

    #[test]
    fn ranks_descending_and_stable() {
        let rows = vec![
            Student::seed("a", "A", "c", "s", 5),
            Student::seed("b", "B", "c", "s", 9),
            Student::seed("c", "C", "c", "s", 5),
        ];
        let ranked = rank_by_xp(rows, None);
        let names: Vec<_> = ranked.iter().map(|r| r.student.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn ties_keep_roster_order() {
        let board = Leaderboard::default();
        let ranked = board.rank(Scope::Class, "9-B", "");
        let names: Vec<_> = ranked.iter().map(|r| r.student.name.as_str()).collect();
        assert_eq!(names, ["Lalith", "Kabir T.", "Aakanksha", "Meera P."]);
    }

    #[test]
    fn merge_appends_new_player() {
        let mut board = Leaderboard::default();
        board.merge_player(&player("Zoe", 4000));
        assert_eq!(board.students().len(), 10);

        let top = &board.rank(Scope::Class, "10-A", "")[0];
        assert!(top.is_player);
        assert_eq!(top.student.id, PLAYER_ID);
    }

    #[test]
    fn merge_keeps_higher_xp_on_same_name() {
        let mut board = Leaderboard::default();
        board.merge_player(&player("Mitesh", 100));
        assert_eq!(board.students().len(), 9);
        let row = board.students().iter().find(|s| s.name == "Mitesh").unwrap();
        assert_eq!(row.xp, 2890);

        board.merge_player(&player("Mitesh", 5000));
        let row = board.students().iter().find(|s| s.name == "Mitesh").unwrap();
        assert_eq!(row.xp, 5000);
        assert!(board.rank(Scope::School, "Kennedy", "mitesh")[0].is_player);
    }

    #[test]
    fn groups_are_distinct_in_order() {
        let board = Leaderboard::default();
        assert_eq!(board.classes(), ["10-A", "9-B", "8-C"]);
        assert_eq!(
            board.groups(Scope::School),
            ["Kennedy", "Little Angels", "Silver Oaks"]
        );
    }

    #[test]
    fn query_is_case_insensitive() {
        let board = Leaderboard::default();
        let hits = board.rank(Scope::School, "Little Angels", "SPAN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].student.name, "Spandhan");
        assert_eq!(hits[0].rank, 1);
        assert!(board.rank(Scope::Class, "8-C", "nobody").is_empty());
    }
}
