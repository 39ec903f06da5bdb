use crate::document::{ModifierGroups, ModifierRecord};

/// `subType` of records granting extra hit points for every character level.
pub const HIT_POINTS_PER_LEVEL: &str = "hit-points-per-level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierCategory {
    Race,
    Class,
    Background,
    Feat,
    Item,
    Condition,
}

impl ModifierCategory {
    pub const ALL: [ModifierCategory; 6] = [
        Self::Race,
        Self::Class,
        Self::Background,
        Self::Feat,
        Self::Item,
        Self::Condition,
    ];

    fn records<'a>(&self, groups: &'a ModifierGroups) -> &'a [ModifierRecord] {
        match self {
            Self::Race => &groups.race,
            Self::Class => &groups.class,
            Self::Background => &groups.background,
            Self::Feat => &groups.feat,
            Self::Item => &groups.item,
            Self::Condition => &groups.condition,
        }
    }
}

/// The `type` tags the resolver understands. Records carrying any other tag
/// stay in the index but never match a kind filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Bonus,
    Set,
    Proficiency,
    Expertise,
    Sense,
}

impl ModifierKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bonus" => Some(Self::Bonus),
            "set" => Some(Self::Set),
            "proficiency" => Some(Self::Proficiency),
            "expertise" => Some(Self::Expertise),
            "sense" => Some(Self::Sense),
            _ => None,
        }
    }
}

impl ModifierRecord {
    pub fn modifier_kind(&self) -> Option<ModifierKind> {
        ModifierKind::from_tag(&self.kind)
    }

    pub fn is_kind(&self, kind: ModifierKind) -> bool {
        self.modifier_kind() == Some(kind)
    }

    pub fn targets_entity(&self, entity_id: i64) -> bool {
        self.entity_id == Some(entity_id)
    }
}

/// Every modifier record of a character as one flat sequence, in category
/// order race, class, background, feat, item, condition.
#[derive(Debug, Clone, Default)]
pub struct ModifierIndex<'a> {
    records: Vec<&'a ModifierRecord>,
}

impl<'a> ModifierIndex<'a> {
    pub fn from_groups(groups: &'a ModifierGroups) -> Self {
        let records = ModifierCategory::ALL
            .iter()
            .flat_map(|category| category.records(groups))
            .collect();
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ModifierRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn of_kind(&self, kind: ModifierKind) -> impl Iterator<Item = &'a ModifierRecord> + '_ {
        self.iter().filter(move |record| record.is_kind(kind))
    }

    pub fn with_sub_type<'s>(
        &'s self,
        sub_type: &'s str,
    ) -> impl Iterator<Item = &'a ModifierRecord> + 's {
        self.iter().filter(move |record| record.sub_type == sub_type)
    }

    pub fn targeting(
        &self,
        entity_id: i64,
        kind: ModifierKind,
    ) -> impl Iterator<Item = &'a ModifierRecord> + '_ {
        self.of_kind(kind)
            .filter(move |record| record.targets_entity(entity_id))
    }

    pub fn has(&self, kind: ModifierKind, sub_type: &str) -> bool {
        self.of_kind(kind).any(|record| record.sub_type == sub_type)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn sum_values<'a>(records: impl Iterator<Item = &'a ModifierRecord>) -> i32 {
    records
        .map(ModifierRecord::value_or_zero)
        .fold(0, i32::saturating_add)
}
