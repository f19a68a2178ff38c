use crate::App;
use ratatui::Frame;

use super::{layout, legend, menu, split_view, status_bar, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let layout_info = layout::calculate_layout(size, app.model.ui.show_menu, app.model.ui.vim_mode);

    if let Some(menu_area) = layout_info.menu_area {
        menu::render_menu(
            f,
            menu_area,
            &app.model.catalog,
            app.model.ui.menu_selection,
            app.model.view.left.slot.path(),
            app.model.view.right.slot.path(),
        );
    }

    split_view::render_split_view(f, &layout_info, app);

    legend::render_legend(
        f,
        layout_info.legend_area,
        app.model.ui.vim_mode,
        app.model.ui.show_menu,
    );

    let formats = app.capability_labels();
    status_bar::render_status_bar(f, layout_info.status_area, &app.model, &formats);

    // Render toast notification if active
    if let Some((message, _timestamp)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
