/// Classifications a plane anchor can report, by wire name
pub struct PlaneClassInfo {
    pub id: u8,
    pub name: &'static str,
}

pub const PLANE_CLASS_MAP: &[PlaneClassInfo] = &[
    PlaneClassInfo { id: 0, name: "unknown" },
    PlaneClassInfo { id: 1, name: "wall" },
    PlaneClassInfo { id: 2, name: "floor" },
    PlaneClassInfo { id: 3, name: "ceiling" },
    PlaneClassInfo { id: 4, name: "table" },
    PlaneClassInfo { id: 5, name: "seat" },
    PlaneClassInfo { id: 6, name: "window" },
    PlaneClassInfo { id: 7, name: "door" },
    PlaneClassInfo { id: 8, name: "not_available" },
    PlaneClassInfo { id: 9, name: "undetermined" },
];

pub fn get_plane_class_name(id: u8) -> &'static str {
    PLANE_CLASS_MAP
        .iter()
        .find(|c| c.id == id)
        .map_or("unknown", |c| c.name)
}

pub fn get_plane_class_id(name: &str) -> Option<u8> {
    PLANE_CLASS_MAP
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.id)
}
