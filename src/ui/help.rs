pub const HELP_TEXT: &str = "\
Calculator help
  * Type digits, operators and functions; each key press is spoken
  * Operators: + - × (or * x) ÷ (or /)
  * Functions: C clear, = equals, ± (or n) negate, % percent, . point
  * Several keys may go on one line: 12+8×2=
  * Commands:
      :lang TAG   change the speech language (en-US es-ES fr-FR zh-CN zh-HK)
      :rate R     change the speaking speed (0.1 to 0.75)
      :keys       show the keypad
      :save       remember language and speed
      :help       show this text
      :quit       leave";
