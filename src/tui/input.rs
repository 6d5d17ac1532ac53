use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::dashboard::{Dashboard, DeleteState, Tab};

/// Maps a key press to a dashboard action. Backend work the action needs is left queued on the
/// dashboard.
pub fn handle_key(dashboard: &mut Dashboard, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        dashboard.running = false;
        return;
    }

    if dashboard.delete_state() == DeleteState::PendingConfirmation {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => dashboard.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                dashboard.cancel_delete_dialog()
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => dashboard.running = false,
        KeyCode::Tab => dashboard.tab = dashboard.tab.next(),
        KeyCode::BackTab => dashboard.tab = dashboard.tab.previous(),
        code => match dashboard.tab {
            Tab::Day => match code {
                KeyCode::Left | KeyCode::Char('h') => dashboard.previous_day(),
                KeyCode::Right | KeyCode::Char('l') => dashboard.next_day(),
                KeyCode::Char('t') => dashboard.select_date(dashboard.today()),
                _ => {}
            },
            Tab::Week => match code {
                KeyCode::Left | KeyCode::Char('h') => dashboard.retreat_week(),
                KeyCode::Right | KeyCode::Char('l') => dashboard.advance_week(),
                _ => {}
            },
            Tab::Other => match code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    dashboard.push_delete_digit(c);
                }
                KeyCode::Backspace => {
                    dashboard.pop_delete_digit();
                }
                KeyCode::Char('d') | KeyCode::Enter => dashboard.open_delete_dialog(),
                _ => {}
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::handle_key;
    use crate::{
        dashboard::{Completion, Dashboard, DeleteState, Effect, Tab},
        utils::clock::FixedClock,
    };

    fn dashboard() -> Dashboard {
        let now = Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 4, 10)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            )
            .earliest()
            .unwrap();
        let mut dashboard = Dashboard::new(Box::new(FixedClock(now)));
        dashboard.mount();
        dashboard.take_effects();
        dashboard.apply(Completion::Refresh(Ok(())));
        dashboard.take_effects();
        dashboard
    }

    fn press(dashboard: &mut Dashboard, code: KeyCode) {
        handle_key(dashboard, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_tab_switching() {
        let mut dashboard = dashboard();
        press(&mut dashboard, KeyCode::Tab);
        assert_eq!(dashboard.tab, Tab::Week);
        press(&mut dashboard, KeyCode::BackTab);
        press(&mut dashboard, KeyCode::BackTab);
        assert_eq!(dashboard.tab, Tab::Other);
    }

    #[test]
    fn test_arrows_follow_the_tab() {
        let mut dashboard = dashboard();
        press(&mut dashboard, KeyCode::Left);
        assert_eq!(
            dashboard.selected_date(),
            NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()
        );
        assert!(matches!(
            dashboard.take_effects()[..],
            [Effect::FetchDay { .. }]
        ));

        press(&mut dashboard, KeyCode::Tab);
        press(&mut dashboard, KeyCode::Left);
        assert_eq!(
            dashboard.week_start().unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
        assert!(matches!(
            dashboard.take_effects()[..],
            [Effect::FetchWeek { .. }]
        ));
    }

    #[test]
    fn test_delete_keys() {
        let mut dashboard = dashboard();
        dashboard.tab = Tab::Other;
        press(&mut dashboard, KeyCode::Backspace);
        assert_eq!(dashboard.delete_input(), "");
        press(&mut dashboard, KeyCode::Char('d'));
        assert_eq!(dashboard.delete_state(), DeleteState::Idle);

        press(&mut dashboard, KeyCode::Char('3'));
        assert_eq!(dashboard.delete_input(), "3");
        assert_eq!(dashboard.delete_months().get(), 3);

        press(&mut dashboard, KeyCode::Char('d'));
        assert_eq!(dashboard.delete_state(), DeleteState::PendingConfirmation);
        // Quitting is disabled while the dialog is open, Esc only closes it
        press(&mut dashboard, KeyCode::Esc);
        assert!(dashboard.running);
        assert_eq!(dashboard.delete_state(), DeleteState::Idle);

        press(&mut dashboard, KeyCode::Enter);
        press(&mut dashboard, KeyCode::Char('y'));
        assert_eq!(dashboard.delete_state(), DeleteState::Deleting);
        assert!(matches!(
            dashboard.take_effects()[..],
            [Effect::DeleteMonths(request)] if request.months.get() == 3
        ));
    }

    #[test]
    fn test_quit() {
        let mut dashboard = dashboard();
        handle_key(
            &mut dashboard,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!dashboard.running);
    }
}
