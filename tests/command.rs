mod tests {
    use tidal_composer::{Command, CommandError};

    #[test]
    fn test_parse_value_commands() {
        assert_eq!(Command::parse("f,50"), Ok(Command::SetTarget(50.0)));
        assert_eq!(Command::parse("  F , 12.5 \r\n"), Ok(Command::SetTarget(12.5)));
        assert_eq!(Command::parse("b,30"), Ok(Command::Retreat(30.0)));
        assert_eq!("f,0".parse::<Command>(), Ok(Command::SetTarget(0.0)));
    }

    #[test]
    fn test_parse_clamps_out_of_range_values() {
        assert_eq!(Command::parse("f,250"), Ok(Command::SetTarget(100.0)));
        assert_eq!(Command::parse("f,-5"), Ok(Command::SetTarget(0.0)));
        assert_eq!(Command::parse("b,120"), Ok(Command::Retreat(100.0)));
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(Command::parse("s"), Ok(Command::TogglePause));
        assert_eq!(Command::parse("S"), Ok(Command::TogglePause));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("QUIT"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(Command::parse("x"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("x,10"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("f"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("f,"), Err(CommandError::MalformedValue));
        assert_eq!(Command::parse("f,abc"), Err(CommandError::MalformedValue));
        assert_eq!(Command::parse("f,NaN"), Err(CommandError::MalformedValue));
    }

    #[test]
    fn test_command_targets() {
        assert_eq!(Command::SetTarget(40.0).target(), Some(40.0));
        assert_eq!(Command::Retreat(30.0).target(), Some(70.0));
        assert_eq!(Command::SetTarget(400.0).target(), Some(100.0));
        assert_eq!(Command::TogglePause.target(), None);
        assert_eq!(Command::Quit.target(), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CommandError::Empty.to_string(), "empty command");
        assert!(CommandError::MalformedValue.to_string().contains("f,50"));
    }
}
