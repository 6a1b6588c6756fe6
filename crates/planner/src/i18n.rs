use std::sync::atomic::{AtomicU8, Ordering};

use room_planner_lib::state::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Korean (default)

pub fn lang() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::English,
        _ => Language::Korean,
    }
}

pub fn set_lang(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::Korean => 0,
            Language::English => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ko = lang() == Language::Korean;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ko { "파일" } else { "File" },
        "menu.open_catalog" => if ko { "카탈로그 열기..." } else { "Open catalog..." },
        "menu.open_catalog_title" => if ko { "카탈로그 JSON 열기" } else { "Open catalog JSON" },
        "menu.reset_layout" => if ko { "배치 초기화" } else { "Reset layout" },
        "menu.quit" => if ko { "종료" } else { "Quit" },

        "menu.view" => if ko { "보기" } else { "View" },
        "menu.sidebar" => if ko { "카탈로그" } else { "Catalog" },
        "menu.properties" => if ko { "속성" } else { "Properties" },
        "menu.plan" => if ko { "평면도" } else { "Floor plan" },
        "menu.placement_table" => if ko { "배치 목록" } else { "Placement list" },
        "menu.reset_camera" => if ko { "카메라 초기화" } else { "Reset camera" },
        "menu.language" => if ko { "언어" } else { "Language" },

        "menu.settings" => if ko { "설정" } else { "Settings" },
        "menu.preferences" => if ko { "환경설정..." } else { "Preferences..." },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ko { "설정" } else { "Settings" },
        "settings.ui" => if ko { "인터페이스" } else { "Interface" },
        "settings.font_size" => if ko { "글꼴 크기" } else { "Font size" },
        "settings.plan" => if ko { "평면도" } else { "Floor plan" },
        "settings.plan_grid" => if ko { "격자 표시" } else { "Show grid" },
        "settings.grid_opacity" => if ko { "격자 불투명도" } else { "Grid opacity" },
        "settings.show_names" => if ko { "이름 표시" } else { "Show names" },
        "settings.viewport" => if ko { "3D 보기" } else { "3D view" },
        "settings.background" => if ko { "배경색" } else { "Background" },
        "settings.floor_grid" => if ko { "바닥 격자" } else { "Floor grid" },
        "settings.labels" => if ko { "가구 라벨" } else { "Furniture labels" },
        "settings.language" => if ko { "언어" } else { "Language" },
        "settings.apply" => if ko { "저장" } else { "Save" },
        "settings.reset" => if ko { "기본값으로" } else { "Reset to defaults" },
        "settings.close" => if ko { "닫기" } else { "Close" },

        // ── Sidebar ─────────────────────────────────────────
        "sidebar.categories" => if ko { "카테고리" } else { "Categories" },
        "sidebar.items" => if ko { "가구" } else { "Furniture" },
        "sidebar.empty" => if ko { "표시할 가구가 없습니다" } else { "No furniture to show" },
        "sidebar.drag_hint" => if ko { "평면도로 끌어다 놓으세요" } else { "Drag onto the floor plan" },

        // ── Properties ──────────────────────────────────────
        "prop.title" => if ko { "속성" } else { "Properties" },
        "prop.select_item" => if ko { "가구를 선택하면" } else { "Select a piece of furniture" },
        "prop.to_view" => if ko { "속성이 표시됩니다" } else { "to see its properties" },
        "prop.name" => if ko { "이름" } else { "Name" },
        "prop.size" => if ko { "크기" } else { "Size" },
        "prop.position" => if ko { "위치" } else { "Position" },
        "prop.rotation" => if ko { "회전" } else { "Rotation" },
        "prop.price" => if ko { "가격" } else { "Price" },
        "prop.rotate" => if ko { "회전" } else { "Rotate" },
        "prop.remove" => if ko { "삭제" } else { "Remove" },
        "prop.placements" => if ko { "배치 목록" } else { "Placements" },
        "prop.no_placements" => if ko { "배치된 가구가 없습니다" } else { "Nothing placed yet" },

        // ── Views ───────────────────────────────────────────
        "plan.title" => if ko { "평면도" } else { "Floor plan" },
        "plan.drop_here" => if ko { "여기에 놓기" } else { "Drop here" },
        "view3d.hint" => if ko { "드래그: 회전 · 우클릭 드래그: 이동 · 휠: 확대" } else { "Drag: orbit · Right-drag: pan · Wheel: zoom" },

        // ── Status bar ──────────────────────────────────────
        "status.room" => if ko { "방" } else { "Room" },
        "status.placed" => if ko { "배치" } else { "Placed" },
        "status.selected" => if ko { "선택" } else { "Selected" },
        "status.ready" => if ko { "준비" } else { "Ready" },
        "status.dragging" => if ko { "끌어다 놓는 중" } else { "Dragging" },
        "status.loading_textures" => if ko { "썸네일 불러오는 중" } else { "Loading thumbnails" },
        "status.out_of_room" => if ko { "방 밖에 놓인 가구" } else { "Outside the room" },

        _ => "???",
    }
}
