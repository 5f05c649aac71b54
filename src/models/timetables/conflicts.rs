//! 课表冲突检测
//!
//! 同一模板、同一星期、同一节次内，教师、班级、教室各自只能出现一次。
//! 存储层按 (模板, 星期, 节次) 取出已有条目，这里逐条比对，每个冲突维度各产生一条记录。

use serde::{Deserialize, Serialize};

use super::entities::TimetableEntry;

crate::string_enum! {
    pub enum ConflictKind {
        TeacherDoubleBooking => "teacher_double_booking",
        ClassDoubleBooking => "class_double_booking",
        RoomDoubleBooking => "room_double_booking",
    }
}

/// 待检测的课表位置
#[derive(Debug, Clone)]
pub struct SlotCandidate {
    pub day_of_week: i32,
    pub slot: i32,
    pub teacher_id: i64,
    pub class_id: i64,
    pub room: Option<String>,
    pub exclude_entry_id: Option<i64>,
}

/// 冲突记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableConflict {
    pub kind: ConflictKind,
    // 与之冲突的已有条目
    pub entry_id: i64,
    pub day_of_week: i32,
    pub slot: i32,
    pub teacher_id: i64,
    pub class_id: i64,
    pub room: Option<String>,
    pub message: String,
}

/// 校验星期与节次取值
pub fn validate_slot(day_of_week: i32, slot: i32) -> Result<(), &'static str> {
    if !(1..=7).contains(&day_of_week) {
        return Err("day_of_week must be between 1 (Monday) and 7 (Sunday)");
    }
    if slot < 1 {
        return Err("slot must be a positive period number");
    }
    Ok(())
}

fn normalize_room(room: Option<&str>) -> Option<String> {
    room.map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_lowercase)
}

/// 找出与候选位置冲突的全部已有条目
pub fn detect_conflicts(
    candidate: &SlotCandidate,
    existing: &[TimetableEntry],
) -> Vec<TimetableConflict> {
    let candidate_room = normalize_room(candidate.room.as_deref());
    let mut conflicts = Vec::new();

    for entry in existing {
        if Some(entry.id) == candidate.exclude_entry_id
            || entry.day_of_week != candidate.day_of_week
            || entry.slot != candidate.slot
        {
            continue;
        }

        let conflict = |kind: ConflictKind, message: String| TimetableConflict {
            kind,
            entry_id: entry.id,
            day_of_week: entry.day_of_week,
            slot: entry.slot,
            teacher_id: entry.teacher_id,
            class_id: entry.class_id,
            room: entry.room.clone(),
            message,
        };

        if entry.teacher_id == candidate.teacher_id {
            conflicts.push(conflict(
                ConflictKind::TeacherDoubleBooking,
                format!(
                    "Teacher {} is already teaching class {} in this slot",
                    entry.teacher_id, entry.class_id
                ),
            ));
        }

        if entry.class_id == candidate.class_id {
            conflicts.push(conflict(
                ConflictKind::ClassDoubleBooking,
                format!(
                    "Class {} already has a lesson in this slot (entry {})",
                    entry.class_id, entry.id
                ),
            ));
        }

        if let Some(room) = candidate_room.as_deref()
            && normalize_room(entry.room.as_deref()).as_deref() == Some(room)
        {
            conflicts.push(conflict(
                ConflictKind::RoomDoubleBooking,
                format!(
                    "Room '{}' is already used by class {} in this slot",
                    entry.room.as_deref().unwrap_or_default().trim(),
                    entry.class_id
                ),
            ));
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, teacher_id: i64, class_id: i64, room: Option<&str>) -> TimetableEntry {
        TimetableEntry {
            id,
            template_id: 1,
            class_id,
            subject_id: 1,
            teacher_id,
            day_of_week: 2,
            slot: 3,
            room: room.map(str::to_string),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn candidate(teacher_id: i64, class_id: i64, room: Option<&str>) -> SlotCandidate {
        SlotCandidate {
            day_of_week: 2,
            slot: 3,
            teacher_id,
            class_id,
            room: room.map(str::to_string),
            exclude_entry_id: None,
        }
    }

    fn kinds(conflicts: &[TimetableConflict]) -> Vec<ConflictKind> {
        conflicts.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_teacher_double_booking() {
        let existing = vec![entry(10, 5, 100, Some("Lab 1"))];
        let conflicts = detect_conflicts(&candidate(5, 200, Some("Lab 2")), &existing);
        assert_eq!(kinds(&conflicts), vec![ConflictKind::TeacherDoubleBooking]);
        assert_eq!(conflicts[0].entry_id, 10);
    }

    #[test]
    fn test_class_and_room_clash_reported_separately() {
        let existing = vec![entry(11, 6, 100, Some("Room A"))];
        let conflicts = detect_conflicts(&candidate(7, 100, Some("  room a ")), &existing);
        assert_eq!(
            kinds(&conflicts),
            vec![
                ConflictKind::ClassDoubleBooking,
                ConflictKind::RoomDoubleBooking
            ]
        );
    }

    #[test]
    fn test_all_three_axes() {
        let existing = vec![entry(12, 5, 100, Some("R1"))];
        let conflicts = detect_conflicts(&candidate(5, 100, Some("R1")), &existing);
        assert_eq!(conflicts.len(), 3);
    }

    #[test]
    fn test_empty_rooms_never_clash() {
        let existing = vec![entry(13, 8, 101, None), entry(14, 9, 102, Some("  "))];
        assert!(detect_conflicts(&candidate(1, 1, None), &existing).is_empty());
        assert!(detect_conflicts(&candidate(1, 1, Some("")), &existing).is_empty());
    }

    #[test]
    fn test_excluded_entry_and_other_slots_ignored() {
        let mut other_slot = entry(15, 5, 100, None);
        other_slot.slot = 4;
        let existing = vec![entry(16, 5, 100, None), other_slot];

        let mut c = candidate(5, 100, None);
        c.exclude_entry_id = Some(16);
        assert!(detect_conflicts(&c, &existing).is_empty());
    }

    #[test]
    fn test_multiple_entries_each_reported() {
        let existing = vec![entry(20, 5, 100, None), entry(21, 6, 101, Some("Hall"))];
        let conflicts = detect_conflicts(&candidate(5, 101, Some("hall")), &existing);
        assert_eq!(
            conflicts
                .iter()
                .map(|c| (c.entry_id, c.kind))
                .collect::<Vec<_>>(),
            vec![
                (20, ConflictKind::TeacherDoubleBooking),
                (21, ConflictKind::ClassDoubleBooking),
                (21, ConflictKind::RoomDoubleBooking),
            ]
        );
    }

    #[test]
    fn test_validate_slot() {
        assert!(validate_slot(1, 1).is_ok());
        assert!(validate_slot(7, 12).is_ok());
        assert!(validate_slot(0, 1).is_err());
        assert!(validate_slot(8, 1).is_err());
        assert!(validate_slot(3, 0).is_err());
    }
}
